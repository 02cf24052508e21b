use crate::Bernstein;

pub fn linspace(start: f64, end: f64, num: usize) -> impl Iterator<Item = f64> {
    let step = if num > 1 {
        (end - start) / (num - 1) as f64
    } else {
        0.0
    };
    (0..num).map(move |i| start + i as f64 * step)
}

/// Random coefficients in `[-1, 1]`.
pub fn random_poly(rng: &mut impl rand::Rng, degree: usize, xmin: f64, xmax: f64) -> Bernstein {
    let coeffs: Vec<f64> = (0..=degree).map(|_| rng.random_range(-1.0..=1.0)).collect();
    Bernstein::new(coeffs, xmin, xmax).unwrap()
}

/// Composite Simpson rule, accurate enough for the smooth integrands in the tests.
pub fn simpson(f: impl Fn(f64) -> f64, a: f64, b: f64) -> f64 {
    const INTERVALS: usize = 4000;
    let h = (b - a) / INTERVALS as f64;
    let mut sum = f(a) + f(b);
    for i in 1..INTERVALS {
        let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
        sum += weight * f(a + i as f64 * h);
    }
    sum * h / 3.0
}

#[allow(dead_code)]
pub fn init_test_logger() {
    use std::io::Write as _;
    let _ = env_logger::builder()
        .is_test(true)
        .format(|buf, record| {
            // Ansi256 ref: https://hexdocs.pm/color_palette/ansi_color_codes.html
            let bg = anstyle::Ansi256Color(240);
            let level_style = buf
                .default_level_style(record.level())
                .bg_color(Some(bg.into()));
            let grey = anstyle::Ansi256Color(255).on(bg);

            let filepath = record
                .file()
                .and_then(|f| std::path::Path::new(f).file_name())
                .map(|name| name.to_string_lossy())
                .unwrap_or_else(|| "unknown".into());
            writeln!(
                buf,
                "{grey}[{grey:#}{level_style}{}{level_style:#}{grey} {}:{}]{grey:#}   {}",
                record.level(),
                filepath,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .try_init();
}
