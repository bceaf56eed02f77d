//! Installs a process-wide logger, so it lives in its own test binary with a
//! single test.

use std::sync::Mutex;

use island_chatbot::TemperatureSetting;
use log::{Level, LevelFilter, Log, Metadata, Record};

#[derive(Default)]
struct Recorder {
    records: Mutex<Vec<(Level, String)>>,
}

impl Recorder {
    fn take(&self) -> Vec<(Level, String)> {
        std::mem::take(&mut *self.records.lock().unwrap())
    }
}

impl Log for Recorder {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if record.target().starts_with("island_chatbot") {
            self.records
                .lock()
                .unwrap()
                .push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

#[test]
fn only_a_rejected_value_logs_a_warning() {
    let recorder: &'static Recorder = Box::leak(Box::default());
    log::set_logger(recorder).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let setting = TemperatureSetting::EXTENDED;

    assert_eq!(setting.resolve(Some("abc")), 0.7);
    let records = recorder.take();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].0, Level::Warn);
    assert!(records[0].1.contains("abc"));

    assert_eq!(setting.resolve(Some("0.3")), 0.3);
    assert!(recorder.take().is_empty());

    assert_eq!(setting.resolve(None), 0.7);
    assert!(recorder.take().is_empty());

    assert_eq!(setting.resolve(Some("2.0")), 0.7);
    let records = recorder.take();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].0, Level::Warn);
}
