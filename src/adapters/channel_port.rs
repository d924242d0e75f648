use crate::controllers::interactive::events::worker_message::WorkerMessage;
use crate::controllers::interactive::ports::worker_message_port::WorkerMessagePort;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

/// Forwards worker messages over an mpsc channel to whoever owns the
/// receiver, usually the thread running the controller.
#[derive(Debug)]
pub struct ChannelMessagePort {
    sender: Sender<WorkerMessage>,
}

impl ChannelMessagePort {
    #[must_use]
    pub fn channel() -> (Arc<Self>, Receiver<WorkerMessage>) {
        let (sender, receiver) = mpsc::channel();
        (Arc::new(Self { sender }), receiver)
    }
}

impl WorkerMessagePort for ChannelMessagePort {
    fn post(&self, message: WorkerMessage) {
        // A dropped receiver means nobody is listening any more.
        let _ = self.sender.send(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posted_messages_arrive_in_order() {
        let (port, receiver) = ChannelMessagePort::channel();

        for request_id in 1..=3 {
            port.post(WorkerMessage::Failed {
                request_id,
                message: String::new(),
            });
        }

        let ids: Vec<u64> = receiver
            .try_iter()
            .map(|message| match message {
                WorkerMessage::Failed { request_id, .. } => request_id,
                other => panic!("unexpected message {other:?}"),
            })
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_post_after_receiver_dropped_is_silent() {
        let (port, receiver) = ChannelMessagePort::channel();
        drop(receiver);

        port.post(WorkerMessage::Crashed {
            request_id: 1,
            message: "gone".to_string(),
        });
    }
}
