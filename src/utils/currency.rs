//! Rupiah formatting. Amounts are integer rupiah everywhere; grouping uses
//! the Indonesian dot separator ("Rp 1.234.567").

pub fn format_thousands(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

pub fn format_rupiah(amount: i64) -> String {
    format!("Rp {}", format_thousands(amount))
}
