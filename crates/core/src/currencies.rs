//! Currencies accepted by the quote service, as (ISO code, display name).

pub const CURRENCIES: &[(&str, &str)] = &[
    ("AED", "UAE Dirham"),
    ("ANG", "Netherlands Antillean Guilder"),
    ("ARS", "Argentine Peso"),
    ("AUD", "Australian Dollar"),
    ("BGN", "Bulgarian Lev"),
    ("BHD", "Bahraini Dinar"),
    ("BND", "Brunei Dollar"),
    ("BOB", "Boliviano"),
    ("BRL", "Brazilian Real"),
    ("BWP", "Pula"),
    ("CAD", "Canadian Dollar"),
    ("CHF", "Swiss Franc"),
    ("CLP", "Chilean Peso"),
    ("CNY", "Yuan Renminbi"),
    ("COP", "Colombian Peso"),
    ("CRC", "Costa Rican Colon"),
    ("CZK", "Czech Koruna"),
    ("DKK", "Danish Krone"),
    ("DOP", "Dominican Peso"),
    ("DZD", "Algerian Dinar"),
    ("EGP", "Egyptian Pound"),
    ("EUR", "Euro"),
    ("FJD", "Fiji Dollar"),
    ("GBP", "Pound Sterling"),
    ("HKD", "Hong Kong Dollar"),
    ("HNL", "Lempira"),
    ("HRK", "Croatian Kuna"),
    ("HUF", "Forint"),
    ("IDR", "Rupiah"),
    ("ILS", "New Israeli Sheqel"),
    ("INR", "Indian Rupee"),
    ("JMD", "Jamaican Dollar"),
    ("JOD", "Jordanian Dinar"),
    ("JPY", "Yen"),
    ("KES", "Kenyan Shilling"),
    ("KRW", "Won"),
    ("KWD", "Kuwaiti Dinar"),
    ("KYD", "Cayman Islands Dollar"),
    ("KZT", "Tenge"),
    ("LBP", "Lebanese Pound"),
    ("LKR", "Sri Lanka Rupee"),
    ("LTL", "Lithuanian Litas"),
    ("LVL", "Latvian Lats"),
    ("MAD", "Moroccan Dirham"),
    ("MDL", "Moldovan Leu"),
    ("MKD", "Denar"),
    ("MUR", "Mauritius Rupee"),
    ("MXN", "Mexican Peso"),
    ("MXV", "Mexican Unidad de Inversion (UDI)"),
    ("MYR", "Malaysian Ringgit"),
    ("NAD", "Namibia Dollar"),
    ("NGN", "Naira"),
    ("NIO", "Cordoba Oro"),
    ("NOK", "Norwegian Krone"),
    ("NPR", "Nepalese Rupee"),
    ("NZD", "New Zealand Dollar"),
    ("OMR", "Rial Omani"),
    ("PEN", "Nuevo Sol"),
    ("PGK", "Kina"),
    ("PHP", "Philippine Peso"),
    ("PKR", "Pakistan Rupee"),
    ("PLN", "Zloty"),
    ("PYG", "Guarani"),
    ("QAR", "Qatari Rial"),
    ("RON", "New Romanian Leu"),
    ("RSD", "Serbian Dinar"),
    ("RUB", "Russian Ruble"),
    ("SAR", "Saudi Riyal"),
    ("SCR", "Seychelles Rupee"),
    ("SEK", "Swedish Krona"),
    ("SGD", "Singapore Dollar"),
    ("SLL", "Leone"),
    ("SVC", "El Salvador Colon"),
    ("THB", "Baht"),
    ("TND", "Tunisian Dinar"),
    ("TRY", "Turkish Lira"),
    ("TTD", "Trinidad and Tobago Dollar"),
    ("TWD", "New Taiwan Dollar"),
    ("TZS", "Tanzanian Shilling"),
    ("UAH", "Hryvnia"),
    ("UGX", "Uganda Shilling"),
    ("USD", "US Dollar"),
    ("UYU", "Peso Uruguayo"),
    ("UZS", "Uzbekistan Sum"),
    ("VEF", "Bolivar Fuerte"),
    ("VND", "Dong"),
    ("YER", "Yemeni Rial"),
    ("ZAR", "Rand"),
    ("ZMK", "Zambian Kwacha"),
];

/// Display name for a currency code, compared case-insensitively.
pub fn currency_name(code: &str) -> Option<&'static str> {
    CURRENCIES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_currency_codes_are_unique_uppercase_iso() {
        let mut seen = HashSet::new();
        for (code, name) in CURRENCIES {
            assert_eq!(code.len(), 3, "{code}");
            assert!(code.chars().all(|c| c.is_ascii_uppercase()), "{code}");
            assert!(!code.contains('2'));
            assert!(!name.is_empty());
            assert!(seen.insert(*code), "duplicate {code}");
        }
        assert_eq!(CURRENCIES.len(), 89);
    }

    #[test]
    fn test_currency_name_case_insensitive() {
        assert_eq!(currency_name("EUR"), Some("Euro"));
        assert_eq!(currency_name("usd"), Some("US Dollar"));
        assert_eq!(currency_name("Gbp"), Some("Pound Sterling"));
    }

    #[test]
    fn test_currency_name_unknown() {
        assert_eq!(currency_name("XYZ"), None);
        assert_eq!(currency_name(""), None);
    }
}
