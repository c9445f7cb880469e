/// Italian EUR display: thousands separated by '.', decimals by ','.
pub fn format_eur(x: f64) -> String {
    let negative = x < 0.0;
    let fixed = format!("{:.2}", x.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("€ {sign}{grouped},{frac_part}")
}
