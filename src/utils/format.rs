use crate::utils::math::round_half_up;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Strong,
    Positive,
    Flat,
    Negative,
}

pub fn format_eps(value: f64) -> String {
    format!("${value:.2}")
}

/// Large amounts use 兆 (1e12), 億 (1e8) and 万 (1e4) units.
pub fn format_usd(value: f64) -> String {
    if value >= 1_000_000_000_000.0 {
        format!("{:.2}兆 USD", value / 1_000_000_000_000.0)
    } else if value >= 100_000_000.0 {
        format!("{:.2}億 USD", value / 100_000_000.0)
    } else if value >= 10_000.0 {
        format!("{:.2}万 USD", value / 10_000.0)
    } else {
        format!("{} USD", group_thousands(round_half_up(value, 0) as i64))
    }
}

pub fn format_yoy(value: f64) -> String {
    let sign = if value > 0.0 { "+" } else { "" };
    format!("{sign}{value:.1}%")
}

pub fn eps_tone(yoy: f64) -> Tone {
    if yoy > 0.0 {
        Tone::Positive
    } else if yoy < 0.0 {
        Tone::Negative
    } else {
        Tone::Flat
    }
}

/// Revenue growth only stands out from 25% upwards.
pub fn revenue_tone(yoy: f64) -> Tone {
    if yoy >= 25.0 {
        Tone::Strong
    } else if yoy >= 0.0 {
        Tone::Flat
    } else {
        Tone::Negative
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
