use common::models::SecuritySummary;

const HEADERS: [&str; 6] = ["Symbol", "Net Qty", "Buy Days", "Sell Days", "Bias", "Score"];

fn cells(row: &SecuritySummary) -> [String; 6] {
    [
        row.symbol.clone(),
        row.net_accumulation_qty.to_string(),
        row.buy_days.to_string(),
        row.sell_days.to_string(),
        row.market_bias.to_string(),
        format!("{:.1}", row.probability_score),
    ]
}

/// Plain-text table with a header and a separator line. The symbol and
/// bias columns are left aligned, numbers right aligned.
pub fn render_table(rows: &[SecuritySummary]) -> String {
    if rows.is_empty() {
        return "No symbols match the current filters.\n".to_string();
    }

    let body: Vec<[String; 6]> = rows.iter().map(cells).collect();
    let mut widths = HEADERS.map(str::len);
    for line in &body {
        for (w, cell) in widths.iter_mut().zip(line.iter()) {
            *w = (*w).max(cell.len());
        }
    }

    let format_line = |values: &[&str]| -> String {
        let parts: Vec<String> = values
            .iter()
            .enumerate()
            .map(|(i, v)| match i {
                0 | 4 => format!("{:<width$}", v, width = widths[i]),
                _ => format!("{:>width$}", v, width = widths[i]),
            })
            .collect();
        parts.join("  ").trim_end().to_string()
    };

    let mut out = String::new();
    out.push_str(&format_line(&HEADERS));
    out.push('\n');
    let total: usize = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    out.push_str(&"-".repeat(total));
    out.push('\n');
    for line in &body {
        let refs: Vec<&str> = line.iter().map(String::as_str).collect();
        out.push_str(&format_line(&refs));
        out.push('\n');
    }
    out
}
