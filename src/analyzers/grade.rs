/// Converts 4.0-scale grade points into the nearest plus/minus letter.
///
/// Band edges sit halfway between adjacent letters:
///
/// | Range       | Grade |
/// |-------------|-------|
/// | >= 4.15     | A+    |
/// | >= 3.85     | A     |
/// | >= 3.50     | A-    |
/// | >= 3.15     | B+    |
/// | >= 2.85     | B     |
/// | >= 2.50     | B-    |
/// | >= 2.15     | C+    |
/// | >= 1.85     | C     |
/// | >= 1.50     | C-    |
/// | >= 1.15     | D+    |
/// | >= 0.85     | D     |
/// | >= 0.50     | D-    |
/// | < 0.50      | F     |
pub fn letter_for(points: f64) -> &'static str {
    match points {
        p if p >= 4.15 => "A+",
        p if p >= 3.85 => "A",
        p if p >= 3.5 => "A-",
        p if p >= 3.15 => "B+",
        p if p >= 2.85 => "B",
        p if p >= 2.5 => "B-",
        p if p >= 2.15 => "C+",
        p if p >= 1.85 => "C",
        p if p >= 1.5 => "C-",
        p if p >= 1.15 => "D+",
        p if p >= 0.85 => "D",
        p if p >= 0.5 => "D-",
        _ => "F",
    }
}
