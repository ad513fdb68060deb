/// Outcome of feeding one line to a [`TitleAccumulator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleStep<'a> {
    Pending,
    /// The title ended on this line; `remainder` is any text after the colon.
    Complete { remainder: Option<&'a str> },
}

/// Joins a section title that spills over several physical lines.
#[derive(Debug, Clone, Default)]
pub struct TitleAccumulator {
    parts: Vec<String>,
}

impl TitleAccumulator {
    pub fn new(first: &str) -> Self {
        let mut accumulator = Self::default();
        accumulator.push_part(first);
        accumulator
    }

    pub fn absorb<'a>(&mut self, line: &'a str) -> TitleStep<'a> {
        match line.split_once(':') {
            Some((head, tail)) => {
                self.push_part(head);
                let tail = tail.trim();
                TitleStep::Complete {
                    remainder: (!tail.is_empty()).then_some(tail),
                }
            }
            None => {
                self.push_part(line);
                TitleStep::Pending
            }
        }
    }

    pub fn title(&self) -> String {
        self.parts.join(" ")
    }

    fn push_part(&mut self, part: &str) {
        let part = part.trim();
        if !part.is_empty() {
            self.parts.push(part.to_string());
        }
    }
}
