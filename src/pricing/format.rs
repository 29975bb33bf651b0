//! Locale-aware currency rendering with zero fractional digits

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LocaleFormat {
    group_separator: char,
}

fn locale_format(locale: &str) -> LocaleFormat {
    match locale {
        "es-AR" | "es-PY" | "es-ES" | "es-UY" | "pt-BR" | "de-DE" => LocaleFormat {
            group_separator: '.',
        },
        _ => LocaleFormat {
            group_separator: ',',
        },
    }
}

fn currency_symbol<'a>(currency: &'a str, locale: &str) -> &'a str {
    match currency {
        "ARS" => "$",
        "PYG" => "Gs.",
        "USD" if locale == "en-US" => "$",
        "USD" => "US$",
        "EUR" => "€",
        "BRL" => "R$",
        other => other,
    }
}

/// Inserts `separator` between each group of three digits, counting from the right.
fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}

/// Renders `value` as `<sign><symbol> <grouped digits>`, rounding half away from zero.
///
/// Non-finite values render as zero so the caller always gets a displayable string.
pub fn format_currency(value: f64, currency: &str, locale: &str) -> String {
    let rounded = if value.is_finite() { value.round() } else { 0.0 };
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    let grouped = group_digits(&digits, locale_format(locale).group_separator);

    format!("{sign}{} {grouped}", currency_symbol(currency, locale))
}
