//! Text rendering of the converter surface.

use rent_core::ConverterView;
use rent_core::calculations::common::format_grouped;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

const RANGE_WIDTH: usize = 24;
const PROGRESS_WIDTH: usize = 10;

/// Draws the deposit range control with a marker at `deposit`.
///
/// The marker is pinned to the nearest end when the deposit is out of range,
/// and sits at the right end when the range is empty or too wide to measure.
pub fn range_bar(
    min: Decimal,
    max: Decimal,
    deposit: Decimal,
) -> String {
    let position = if max <= min {
        RANGE_WIDTH
    } else if deposit <= min {
        0
    } else if deposit >= max {
        RANGE_WIDTH
    } else {
        max.checked_sub(min)
            .zip(deposit.checked_sub(min))
            .and_then(|(span, offset)| offset.checked_div(span))
            .and_then(|fraction| (fraction * Decimal::from(RANGE_WIDTH)).round().to_usize())
            .map_or(RANGE_WIDTH, |position| position.min(RANGE_WIDTH))
    };

    let mut bar = String::with_capacity(RANGE_WIDTH + 3);
    bar.push('[');
    for idx in 0..=RANGE_WIDTH {
        bar.push(if idx == position { 'o' } else { '-' });
    }
    bar.push(']');
    bar
}

/// Draws a progress bar such as `[#####-----]  50%`.
pub fn progress_bar(progress: u8) -> String {
    let progress = progress.min(100);
    let filled = usize::from(progress) * PROGRESS_WIDTH / 100;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(PROGRESS_WIDTH - filled),
        progress
    )
}

/// Renders the full surface: range control, both edit fields, the progress
/// bar while converting, and the summary line.
pub fn render_text(view: &ConverterView) -> String {
    let mut lines = vec![
        format!(
            "Deposit range  {} {} {}",
            format_grouped(view.min_deposit),
            range_bar(view.min_deposit, view.max_deposit, view.deposit),
            format_grouped(view.max_deposit)
        ),
        format!("Deposit        {}", format_grouped(view.deposit)),
        format!("Monthly rent   {}", format_grouped(view.rent)),
    ];
    if let Some(progress) = view.progress {
        lines.push(format!("Converting     {}", progress_bar(progress)));
    }
    lines.push(view.summary());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn view(progress: Option<u8>) -> ConverterView {
        ConverterView {
            min_deposit: dec!(500000000),
            max_deposit: dec!(900000000),
            deposit: dec!(600000000),
            rent: dec!(12000000),
            progress,
        }
    }

    #[test]
    fn range_bar_marks_position() {
        assert_eq!(
            range_bar(dec!(0), dec!(24), dec!(0)),
            "[o------------------------]"
        );
        assert_eq!(
            range_bar(dec!(0), dec!(24), dec!(24)),
            "[------------------------o]"
        );
        assert_eq!(
            range_bar(dec!(0), dec!(24), dec!(6)),
            "[------o------------------]"
        );
    }

    #[test]
    fn range_bar_pins_out_of_range_values() {
        assert_eq!(
            range_bar(dec!(10), dec!(20), dec!(0)),
            range_bar(dec!(10), dec!(20), dec!(10))
        );
        assert_eq!(
            range_bar(dec!(10), dec!(20), dec!(99)),
            range_bar(dec!(10), dec!(20), dec!(20))
        );
    }

    #[test]
    fn range_bar_handles_empty_range() {
        assert_eq!(
            range_bar(dec!(10), dec!(10), dec!(10)),
            "[------------------------o]"
        );
    }

    #[test]
    fn range_bar_handles_extreme_bounds() {
        assert_eq!(
            range_bar(Decimal::MIN, Decimal::MAX, Decimal::ZERO),
            "[------------------------o]"
        );
        assert_eq!(
            range_bar(dec!(500000000), dec!(900000000), Decimal::MIN),
            "[o------------------------]"
        );
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(0), "[----------]   0%");
        assert_eq!(progress_bar(50), "[#####-----]  50%");
        assert_eq!(progress_bar(100), "[##########] 100%");
    }

    #[test]
    fn render_text_without_progress() {
        let text = render_text(&view(None));

        assert_eq!(
            text,
            "Deposit range  500,000,000 [------o------------------] 900,000,000\n\
             Deposit        600,000,000\n\
             Monthly rent   12,000,000\n\
             Deposit 600,000,000 with monthly rent 12,000,000"
        );
    }

    #[test]
    fn render_text_shows_progress_while_converting() {
        let text = render_text(&view(Some(30)));

        assert!(text.contains("Converting     [###-------]  30%"));
    }
}
