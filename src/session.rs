use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use crate::error::{Error, RuntimeError};
use crate::io::ProgramIo;

/// What a running program reports back to its host.
#[derive(Debug)]
pub enum SessionEvent {
    Output(String),
    InputRequest(String),
    Finished(Result<(), Error>),
}

enum Reply {
    Answer(String),
    Cancel,
}

struct ChannelIo {
    events: Sender<SessionEvent>,
    replies: Receiver<Reply>,
}

impl ProgramIo for ChannelIo {
    fn emit(&mut self, text: &str) {
        let _ = self.events.send(SessionEvent::Output(text.to_string()));
    }

    fn request_input(&mut self, prompt: &str) -> Result<String, RuntimeError> {
        if self
            .events
            .send(SessionEvent::InputRequest(prompt.to_string()))
            .is_err()
        {
            return Err(RuntimeError::InputCancelled);
        }
        match self.replies.recv() {
            Ok(Reply::Answer(answer)) => Ok(answer),
            Ok(Reply::Cancel) | Err(_) => Err(RuntimeError::InputCancelled),
        }
    }
}

/// A program running on its own thread. The host drains events and
/// answers input requests; the worker delivers `Finished` as its last
/// event, and the channel disconnects once the worker is gone, so a
/// worker that dies without `Finished` still ends the host's wait.
pub struct Session {
    events: Receiver<SessionEvent>,
    replies: Sender<Reply>,
}

#[derive(Clone)]
pub struct CancelHandle {
    replies: Sender<Reply>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        let _ = self.replies.send(Reply::Cancel);
    }
}

impl Session {
    pub fn run(source: String) -> Session {
        let (event_tx, event_rx) = mpsc::channel();
        let (reply_tx, reply_rx) = mpsc::channel();

        thread::spawn(move || {
            let mut io = ChannelIo {
                events: event_tx.clone(),
                replies: reply_rx,
            };
            let result = crate::execute(&source, &mut io).map(|_| ());
            let _ = event_tx.send(SessionEvent::Finished(result));
        });

        Session {
            events: event_rx,
            replies: reply_tx,
        }
    }

    pub fn next_event(&self) -> Option<SessionEvent> {
        self.events.recv().ok()
    }

    pub fn poll_event(&self, timeout: Duration) -> Result<SessionEvent, RecvTimeoutError> {
        self.events.recv_timeout(timeout)
    }

    pub fn reply(&self, answer: &str) {
        let _ = self.replies.send(Reply::Answer(answer.to_string()));
    }

    pub fn cancel(&self) {
        let _ = self.replies.send(Reply::Cancel);
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            replies: self.replies.clone(),
        }
    }
}
