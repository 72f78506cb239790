//! Telnet IAC filtering.
//!
//! Telnet clients interleave option negotiation with typed text. The game
//! only wants the text, so [`IacFilter`] removes every IAC sequence and
//! refuses every option the peer offers or requests:
//! `IAC DO x` gets `IAC WONT x`, `IAC WILL x` gets `IAC DONT x`.
//! Subnegotiation blocks (`IAC SB ... IAC SE`) are dropped whole.

const IAC: u8 = 255;
const DONT: u8 = 254;
const DO: u8 = 253;
const WONT: u8 = 252;
const WILL: u8 = 251;
const SB: u8 = 250;
const SE: u8 = 240;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum State {
    #[default]
    Data,
    Iac,
    Option(u8),
    Subneg,
    SubnegIac,
}

/// Streaming IAC stripper. Keeps state across chunks, so a sequence split
/// over two reads is still recognised.
#[derive(Debug, Default)]
pub struct IacFilter {
    state: State,
}

/// Output of one [`IacFilter::filter`] call.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Filtered {
    /// Game text with all negotiation removed.
    pub data: Vec<u8>,
    /// Bytes to write back to the peer.
    pub replies: Vec<u8>,
}

impl IacFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&mut self, chunk: &[u8]) -> Filtered {
        let mut out = Filtered {
            data: Vec::with_capacity(chunk.len()),
            replies: Vec::new(),
        };

        for &b in chunk {
            self.state = match (self.state, b) {
                (State::Data, IAC) => State::Iac,
                (State::Data, _) => {
                    out.data.push(b);
                    State::Data
                }
                (State::Iac, IAC) => {
                    out.data.push(IAC);
                    State::Data
                }
                (State::Iac, DO | DONT | WILL | WONT) => State::Option(b),
                (State::Iac, SB) => State::Subneg,
                // NOP, GA and friends carry no payload.
                (State::Iac, _) => State::Data,
                (State::Option(cmd), opt) => {
                    match cmd {
                        DO => out.replies.extend_from_slice(&[IAC, WONT, opt]),
                        WILL => out.replies.extend_from_slice(&[IAC, DONT, opt]),
                        _ => {}
                    }
                    State::Data
                }
                (State::Subneg, IAC) => State::SubnegIac,
                (State::Subneg, _) => State::Subneg,
                (State::SubnegIac, SE) => State::Data,
                (State::SubnegIac, _) => State::Subneg,
            };
        }

        out
    }
}
