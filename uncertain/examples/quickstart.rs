//! Minimal end-to-end example: format a measurement, read it back, and print a length with SI prefixes.

use uncertain::length::Meter;
use uncertain::{FormatOptions, Measured, ScaleMode, UncertainValue};

fn main() {
    let opts = FormatOptions::default()
        .with_plus_minus(true)
        .with_confidence_limits(true);

    let v = UncertainValue::new(1.23, 0.45, 12);
    let text = v.display(&opts).to_string();
    assert_eq!(text, "1.2 +/-0.45 <0.35, 2.11>");

    let back = uncertain::parse::parse(&text, &opts).unwrap();
    assert_eq!(back.value.mean(), 1.2);
    assert_eq!(back.consumed, text.len());

    let opts = opts
        .with_confidence_limits(false)
        .with_scale(ScaleMode::AutoSiPrefix);
    let d = Measured::<Meter>::new(0.0125, 0.0004);
    assert_eq!(d.format(&opts), "12.5 +/-0.40 mm");
    println!("{}  |  {}", text, d.format(&opts));
}
