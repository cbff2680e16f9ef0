use std::sync::Once;

static LOGGER_INIT: Once = Once::new();

pub fn init_logger() {
    LOGGER_INIT.call_once(|| {
        let colors = fern::colors::ColoredLevelConfig::new().info(fern::colors::Color::Cyan);
        fern::Dispatch::new()
            .format(move |out, message, record| {
                out.finish(format_args!(
                    "![{:5}] {} {}",
                    colors.color(record.level()),
                    chrono::Local::now().format("[%Y-%m-%d %H:%M:%S]"),
                    message
                ))
            })
            .level(log::LevelFilter::Debug)
            .chain(std::io::stdout())
            .apply()
            .unwrap_or(());
    });
}

#[allow(dead_code)]
pub fn assert_close(expected: f64, actual: f64, epsilon: f64) {
    assert!(
        (expected - actual).abs() < epsilon,
        "expected {}, got {}",
        expected,
        actual
    );
}
