use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

pub enum Event {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Reads terminal input on its own thread and emits a tick between reads,
/// so request completions get applied even while the keyboard is idle.
pub struct EventHandler {
    receiver: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate: u64) -> Self {
        let (sender, receiver) = mpsc::channel();

        thread::spawn(move || loop {
            let event = match event::poll(Duration::from_millis(tick_rate)) {
                Ok(true) => match event::read() {
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => Event::Key(key),
                    Ok(CrosstermEvent::Resize(_, _)) => Event::Resize,
                    _ => Event::Tick,
                },
                _ => Event::Tick,
            };
            if sender.send(event).is_err() {
                break;
            }
        });

        Self { receiver }
    }

    pub fn recv(&self) -> Result<Event, mpsc::RecvError> {
        self.receiver.recv()
    }
}
