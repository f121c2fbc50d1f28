use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Spawn the 1 Hz clock pulse. The session owns the countdown itself; this
/// thread only delivers the cadence. It exits as soon as the receiver is
/// dropped, so dropping the handle is the cancellation mechanism.
pub fn spawn_ticker() -> mpsc::Receiver<()> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || loop {
        thread::sleep(Duration::from_secs(1));
        if tx.send(()).is_err() {
            break;
        }
    });

    rx
}

/// h:mm:ss countdown display.
pub fn format_clock(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{}:{:02}:{:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_formatting() {
        assert_eq!(format_clock(0), "0:00:00");
        assert_eq!(format_clock(59), "0:00:59");
        assert_eq!(format_clock(65), "0:01:05");
        assert_eq!(format_clock(3 * 3600), "3:00:00");
        assert_eq!(format_clock(3661), "1:01:01");
    }
}
