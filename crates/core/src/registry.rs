//! Conversion rules, lookup and introspection
//!
//! A [`Registry`] is a flat, ordered list of [`ConversionRule`]s. Lookups scan
//! the list in insertion order and the first rule whose units match (ignoring
//! case) wins. Listing helpers deduplicate but keep first-seen order.

use crate::currencies::{currency_name, CURRENCIES};
use crate::format::{render, OutputFormat};
use crate::rates::RateProvider;
use crate::{Error, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Number,
    Currency,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Number => "number",
            Category::Currency => "currency",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// (abbreviation, display name, radix)
pub const NUMBER_BASES: [(&str, &str, u32); 4] = [
    ("dec", "Decimal", 10),
    ("hex", "Hexadecimal", 16),
    ("oct", "Octal", 8),
    ("bin", "Binary", 2),
];

pub type Transform = Box<dyn Fn(&str, &mut dyn RateProvider) -> Result<String> + Send + Sync>;

pub struct ConversionRule {
    category: Category,
    from: String,
    to: String,
    transform: Transform,
}

impl ConversionRule {
    pub fn new<F>(category: Category, from: impl Into<String>, to: impl Into<String>, transform: F) -> Self
    where
        F: Fn(&str, &mut dyn RateProvider) -> Result<String> + Send + Sync + 'static,
    {
        Self {
            category,
            from: from.into(),
            to: to.into(),
            transform: Box::new(transform),
        }
    }

    /// Rule converting an unsigned integer between two radixes.
    pub fn base(from: &str, from_radix: u32, to: &str, to_radix: u32) -> Self {
        Self::new(Category::Number, from, to, move |input, _rates| {
            convert_base(input, from_radix, to_radix)
        })
    }

    /// Rule converting an amount between two currencies through a rate provider.
    pub fn currency(from: &str, to: &str) -> Self {
        let (rate_from, rate_to) = (from.to_string(), to.to_string());
        Self::new(Category::Currency, from, to, move |input, rates| {
            convert_currency(input, &rate_from, &rate_to, rates)
        })
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn matches(&self, from: &str, to: &str) -> bool {
        self.from.eq_ignore_ascii_case(from) && self.to.eq_ignore_ascii_case(to)
    }

    pub fn apply(&self, input: &str, rates: &mut dyn RateProvider) -> Result<String> {
        (self.transform)(input, rates)
    }
}

impl fmt::Debug for ConversionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionRule")
            .field("category", &self.category)
            .field("from", &self.from)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}

/// Parses `input` in `from_radix` and prints it in `to_radix`.
///
/// Hex output is lowercase. Signs are rejected, including a leading `+`.
pub fn convert_base(input: &str, from_radix: u32, to_radix: u32) -> Result<String> {
    if input.starts_with(['+', '-']) {
        return Err(Error::InvalidNumericInput(format!(
            "\"{input}\" is not an unsigned base-{from_radix} number"
        )));
    }

    let n = u64::from_str_radix(input, from_radix).map_err(|e| {
        Error::InvalidNumericInput(format!(
            "\"{input}\" is not a valid base-{from_radix} number: {e}"
        ))
    })?;

    Ok(match to_radix {
        2 => format!("{n:b}"),
        8 => format!("{n:o}"),
        16 => format!("{n:x}"),
        _ => n.to_string(),
    })
}

/// Multiplies `input` by the `from`/`to` rate and prints it with two decimals.
pub fn convert_currency(
    input: &str,
    from: &str,
    to: &str,
    rates: &mut dyn RateProvider,
) -> Result<String> {
    let amount = input
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| Error::InvalidNumericInput(format!("\"{input}\" is not a valid amount")))?;

    let rate = rates.rate(from, to)?;
    let converted = amount * rate;
    if !converted.is_finite() {
        return Err(Error::InvalidNumericInput(format!(
            "\"{input}\" {from} is out of range at rate {rate}"
        )));
    }

    Ok(format!("{converted:.2}"))
}

#[derive(Default)]
pub struct Registry {
    rules: Vec<ConversionRule>,
}

impl Registry {
    /// Registry with every number-base pair and every currency pair.
    pub fn new() -> Self {
        let mut registry = Self::empty();

        for (from, _, from_radix) in NUMBER_BASES {
            for (to, _, to_radix) in NUMBER_BASES {
                if from != to {
                    registry.add(ConversionRule::base(from, from_radix, to, to_radix));
                }
            }
        }

        for (from, _) in CURRENCIES {
            for (to, _) in CURRENCIES {
                registry.add(ConversionRule::currency(from, to));
            }
        }

        registry
    }

    /// Registry with no rules.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn add(&mut self, rule: ConversionRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[ConversionRule] {
        &self.rules
    }

    pub fn find(&self, from: &str, to: &str) -> Option<&ConversionRule> {
        self.rules.iter().find(|rule| rule.matches(from, to))
    }

    pub fn convert(
        &self,
        from: &str,
        to: &str,
        input: &str,
        rates: &mut dyn RateProvider,
    ) -> Result<String> {
        self.find(from, to)
            .ok_or_else(|| Error::UnsupportedConversion {
                from: from.to_string(),
                to: to.to_string(),
            })?
            .apply(input, rates)
    }

    /// Converts and renders the result with the units' display names.
    pub fn convert_formatted(
        &self,
        format: OutputFormat,
        from: &str,
        to: &str,
        input: &str,
        rates: &mut dyn RateProvider,
    ) -> Result<String> {
        let output = self.convert(from, to, input, rates)?;
        let (from, to) = self.original_unit_names(from, to);
        let category = self
            .find(&from, &to)
            .map(ConversionRule::category)
            .unwrap_or(Category::Number);

        Ok(render(
            format.template(),
            input,
            &output,
            &self.nice_unit_name(category, &from),
            &self.nice_unit_name(category, &to),
        ))
    }

    pub fn category_names(&self) -> Vec<Category> {
        let mut names = Vec::new();
        for rule in &self.rules {
            if !names.contains(&rule.category) {
                names.push(rule.category);
            }
        }
        names
    }

    pub fn nice_category_name(&self, category: Category) -> String {
        let name = category.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Distinct source units of a category, in registration order.
    pub fn unit_names(&self, category: Category) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for rule in self.rules.iter().filter(|r| r.category == category) {
            if !names.contains(&rule.from.as_str()) {
                names.push(&rule.from);
            }
        }
        names
    }

    pub fn nice_unit_name(&self, category: Category, unit: &str) -> String {
        let name = match category {
            Category::Number => NUMBER_BASES
                .iter()
                .find(|(abbr, _, _)| abbr.eq_ignore_ascii_case(unit))
                .map(|(_, name, _)| *name),
            Category::Currency => currency_name(unit),
        };
        name.unwrap_or(unit).to_string()
    }

    /// Unit names as registered, or the inputs unchanged when no rule matches.
    pub fn original_unit_names(&self, from: &str, to: &str) -> (String, String) {
        match self.find(from, to) {
            Some(rule) => (rule.from.clone(), rule.to.clone()),
            None => (from.to_string(), to.to_string()),
        }
    }
}
