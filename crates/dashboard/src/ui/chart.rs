use strategy::ChartBar;

pub const BAR_WIDTH: usize = 40;

/// Horizontal bars scaled to the largest absolute quantity. Negative bars
/// are drawn with `-` instead of `#`.
pub fn render_chart(bars: &[ChartBar]) -> String {
    if bars.is_empty() {
        return String::new();
    }

    let label_width = bars.iter().map(|b| b.symbol.len()).max().unwrap_or(0);
    let peak = bars
        .iter()
        .map(|b| b.net_accumulation_qty.unsigned_abs())
        .max()
        .unwrap_or(0);

    let mut out = String::from("Top net accumulation\n");
    for bar in bars {
        let magnitude = bar.net_accumulation_qty.unsigned_abs();
        let len = if peak == 0 {
            0
        } else {
            ((magnitude as f64 / peak as f64) * BAR_WIDTH as f64).round() as usize
        };
        let glyph = if bar.net_accumulation_qty < 0 { "-" } else { "#" };
        out.push_str(&format!(
            "{:<width$} | {} {}\n",
            bar.symbol,
            glyph.repeat(len.max(usize::from(magnitude > 0))),
            bar.net_accumulation_qty,
            width = label_width
        ));
    }
    out
}
