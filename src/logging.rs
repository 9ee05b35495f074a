use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::PathBuf;
use chrono::Local;
use std::sync::Mutex;

lazy_static::lazy_static! {
    static ref LOG_FILE: Mutex<Option<PathBuf>> = Mutex::new(None);
}

pub fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("member-console")
        .join("logs");

    create_dir_all(&log_dir)?;

    let log_file = log_dir.join(format!("member-console-{}.log", Local::now().format("%Y%m%d-%H%M%S")));

    if let Ok(mut slot) = LOG_FILE.lock() {
        *slot = Some(log_file.clone());
    }

    log_info(&format!("Logging initialized to: {}", log_file.display()));

    Ok(())
}

pub fn log_error(message: &str) {
    log_with_level("ERROR", message);
}

pub fn log_info(message: &str) {
    log_with_level("INFO", message);
}

pub fn log_debug(message: &str) {
    log_with_level("DEBUG", message);
}

pub fn log_panic_info(info: &std::panic::PanicHookInfo) {
    let mut message = String::from("PANIC: ");

    if let Some(location) = info.location() {
        message.push_str(&format!("at {}:{}:{} - ",
            location.file(),
            location.line(),
            location.column()
        ));
    }

    if let Some(s) = info.payload().downcast_ref::<&str>() {
        message.push_str(s);
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        message.push_str(s);
    } else {
        message.push_str("Unknown panic payload");
    }

    log_error(&message);

    let backtrace = std::backtrace::Backtrace::capture();
    log_debug(&format!("Backtrace:\n{}", backtrace));
}

fn log_with_level(level: &str, message: &str) {
    let Ok(slot) = LOG_FILE.lock() else { return };
    if let Some(log_file) = slot.as_ref() {
        if let Ok(mut file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)
        {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            let _ = writeln!(file, "[{}] {} - {}", timestamp, level, message);
        }
    }

    // stderr stays quiet, it would tear the full-screen console
}

pub fn get_log_file_path() -> Option<PathBuf> {
    LOG_FILE.lock().ok().and_then(|slot| slot.clone())
}
