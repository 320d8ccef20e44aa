//! Output templates
//!
//! Templates use four fixed placeholders:
//!
//! | Placeholder | Replaced with                  |
//! |-------------|--------------------------------|
//! | `%i`        | input value                    |
//! | `%o`        | converted value                |
//! | `%u`        | display name of the source unit |
//! | `%v`        | display name of the target unit |

use crate::Error;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Simple,
    WithUnit,
    #[default]
    Full,
}

impl OutputFormat {
    pub fn template(self) -> &'static str {
        match self {
            OutputFormat::Simple => "%i",
            OutputFormat::WithUnit => "%i %u",
            OutputFormat::Full => "%i %u = %o %v",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simple" => Ok(OutputFormat::Simple),
            "withunit" => Ok(OutputFormat::WithUnit),
            "full" => Ok(OutputFormat::Full),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

pub fn render(template: &str, input: &str, output: &str, source: &str, target: &str) -> String {
    template
        .replace("%i", input)
        .replace("%o", output)
        .replace("%u", source)
        .replace("%v", target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_full() {
        assert_eq!(
            render("%i %u = %o %v", "10", "9.27", "Euro", "US Dollar"),
            "10 Euro = 9.27 US Dollar"
        );
    }

    #[test]
    fn test_render_canned_templates() {
        let render_with = |f: OutputFormat| render(f.template(), "ff", "255", "Hexadecimal", "Decimal");
        assert_eq!(render_with(OutputFormat::Simple), "ff");
        assert_eq!(render_with(OutputFormat::WithUnit), "ff Hexadecimal");
        assert_eq!(
            render_with(OutputFormat::Full),
            "ff Hexadecimal = 255 Decimal"
        );
    }

    #[test]
    fn test_render_repeated_placeholders() {
        assert_eq!(render("%o (%o)", "1", "2", "a", "b"), "2 (2)");
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("simple".parse::<OutputFormat>().unwrap(), OutputFormat::Simple);
        assert_eq!("withUnit".parse::<OutputFormat>().unwrap(), OutputFormat::WithUnit);
        assert_eq!("WITHUNIT".parse::<OutputFormat>().unwrap(), OutputFormat::WithUnit);
        assert_eq!("Full".parse::<OutputFormat>().unwrap(), OutputFormat::Full);
    }

    #[test]
    fn test_output_format_unknown() {
        assert_eq!(
            "fancy".parse::<OutputFormat>().unwrap_err(),
            Error::UnknownFormat("fancy".to_string())
        );
    }
}
