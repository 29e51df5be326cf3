//! Control requests travelling from the control thread to the render thread.
//!
//! The channel is an `rtrb` single-producer/single-consumer ring: both push
//! and pop are wait-free and never allocate after construction. A full ring
//! drops the newest command; there is no retry and no acknowledgement.

use rtrb::{Consumer, Producer, PushError, RingBuffer};

/// Default ring capacity, in commands.
pub const DEFAULT_COMMAND_CAPACITY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    EnableFilter,
    DisableFilter,
    EnableDelay,
    EnableHall,
    DisableDelay,
    DisableHall,
    /// Flip one filter-bank band on or off.
    ToggleBand(usize),
    AllEffectsOff,
}

/// Anything the render engine can drain commands from.
pub trait CommandReceiver: Send {
    fn pop(&mut self) -> Option<Command>;
}

impl CommandReceiver for Consumer<Command> {
    fn pop(&mut self) -> Option<Command> {
        Consumer::pop(self).ok()
    }
}

/// Control-thread end of the command ring.
pub struct CommandSender {
    tx: Producer<Command>,
    dropped: u64,
}

impl CommandSender {
    /// Queue `command` for the next rendered block.
    ///
    /// Returns `false` when the ring is full; the command is discarded.
    pub fn submit(&mut self, command: Command) -> bool {
        match self.tx.push(command) {
            Ok(()) => true,
            Err(PushError::Full(command)) => {
                self.dropped += 1;
                log::debug!("command ring full, dropped {:?}", command);
                false
            }
        }
    }

    /// Commands rejected so far because the ring was full.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Free slots right now.
    pub fn slots(&self) -> usize {
        self.tx.slots()
    }

    /// True once the render side has been dropped.
    pub fn is_abandoned(&self) -> bool {
        self.tx.is_abandoned()
    }
}

/// Create a command ring holding at most `capacity` pending commands.
pub fn command_channel(capacity: usize) -> (CommandSender, Consumer<Command>) {
    let (tx, rx) = RingBuffer::new(capacity);
    (CommandSender { tx, dropped: 0 }, rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_arrive_in_submission_order() {
        let (mut tx, mut rx) = command_channel(DEFAULT_COMMAND_CAPACITY);
        assert!(tx.submit(Command::EnableDelay));
        assert!(tx.submit(Command::ToggleBand(2)));
        assert!(tx.submit(Command::AllEffectsOff));

        assert_eq!(CommandReceiver::pop(&mut rx), Some(Command::EnableDelay));
        assert_eq!(CommandReceiver::pop(&mut rx), Some(Command::ToggleBand(2)));
        assert_eq!(CommandReceiver::pop(&mut rx), Some(Command::AllEffectsOff));
        assert_eq!(CommandReceiver::pop(&mut rx), None);
    }

    #[test]
    fn full_ring_rejects_newest_command() {
        let (mut tx, mut rx) = command_channel(2);
        assert!(tx.submit(Command::EnableFilter));
        assert!(tx.submit(Command::EnableDelay));
        assert!(!tx.submit(Command::EnableHall));
        assert_eq!(tx.dropped(), 1);
        assert_eq!(tx.slots(), 0);

        assert_eq!(CommandReceiver::pop(&mut rx), Some(Command::EnableFilter));
        assert_eq!(CommandReceiver::pop(&mut rx), Some(Command::EnableDelay));
        assert_eq!(CommandReceiver::pop(&mut rx), None);

        // Space frees up once the consumer drains.
        assert!(tx.submit(Command::EnableHall));
    }

    #[test]
    fn sender_notices_dropped_receiver() {
        let (tx, rx) = command_channel(4);
        assert!(!tx.is_abandoned());
        drop(rx);
        assert!(tx.is_abandoned());
    }

    #[test]
    fn works_across_threads() {
        let (mut tx, mut rx) = command_channel(DEFAULT_COMMAND_CAPACITY);

        let producer = std::thread::spawn(move || {
            let mut sent = 0;
            while sent < 100 {
                if tx.submit(Command::ToggleBand(sent)) {
                    sent += 1;
                } else {
                    std::thread::yield_now();
                }
            }
        });

        let mut received = Vec::new();
        while received.len() < 100 {
            match CommandReceiver::pop(&mut rx) {
                Some(Command::ToggleBand(band)) => received.push(band),
                Some(other) => panic!("unexpected {:?}", other),
                None => std::thread::yield_now(),
            }
        }
        producer.join().unwrap();

        assert_eq!(received, (0..100).collect::<Vec<_>>());
    }
}
