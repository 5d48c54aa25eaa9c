//! Console fed from a fixed list of answers, recording everything shown.

use std::collections::VecDeque;
use std::io;

use super::{Console, Prompt, Tone};

#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    asked: Vec<Prompt>,
    output: Vec<(String, Tone)>,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
            output: Vec::new(),
        }
    }

    pub fn push_answer(&mut self, answer: impl Into<String>) {
        self.answers.push_back(answer.into());
    }

    pub fn remaining_answers(&self) -> usize {
        self.answers.len()
    }

    pub fn asked(&self) -> &[Prompt] {
        &self.asked
    }

    pub fn output(&self) -> &[(String, Tone)] {
        &self.output
    }

    /// True if any shown line contains `needle`.
    pub fn saw(&self, needle: &str) -> bool {
        self.output.iter().any(|(line, _)| line.contains(needle))
    }
}

impl Console for ScriptedConsole {
    fn ask(&mut self, prompt: &Prompt) -> io::Result<Option<String>> {
        self.asked.push(prompt.clone());
        Ok(self.answers.pop_front())
    }

    fn show(&mut self, text: &str, tone: Tone) {
        self.output.push((text.to_string(), tone));
    }
}
