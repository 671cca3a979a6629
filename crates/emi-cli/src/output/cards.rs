use colored::Colorize;
use serde_json::{Map, Value};

const CARDS: [(&str, &str); 3] = [
    ("installment", "Monthly EMI"),
    ("totalInterest", "Total Interest"),
    ("totalAmount", "Total Amount"),
];

/// Print the three result cards of the loan summary panel.
pub fn print_cards(summary: &Map<String, Value>, currency_symbol: &str) {
    println!("{}", "Loan Summary".bold());
    for (key, label) in CARDS {
        let Some(amount) = summary.get(key).and_then(Value::as_i64) else {
            continue;
        };
        println!("  {:<15} {}", label, format_amount(amount, currency_symbol).cyan().bold());
    }
}

/// Placeholder shown before anything has been calculated.
pub fn print_placeholder() {
    println!(
        "{}",
        "Fill in the details and run `emi calculate` to see the results".dimmed()
    );
}

/// Currency symbol plus digits grouped in threes, sign before the symbol.
pub fn format_amount(amount: i64, currency_symbol: &str) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}{currency_symbol}{}", group_thousands(amount.unsigned_abs()))
}

pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
