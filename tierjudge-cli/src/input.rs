/// Maps typed input to comparison actions.
///
/// Every input source (typed digits, words, arrow keys, a scripted file)
/// funnels into the same `Action`, so the engine never knows where a pick
/// came from.
use anyhow::{bail, Result};
use tierjudge_core::Pick;

use crate::config::TierjudgeConfig;

/// Left/right arrow keys as a line-buffered terminal delivers them.
const ARROW_LEFT: &str = "\x1b[D";
const ARROW_RIGHT: &str = "\x1b[C";

const DEFAULT_FIRST_KEYS: [&str; 2] = ["1", "left"];
const DEFAULT_SECOND_KEYS: [&str; 2] = ["2", "right"];
const RESTART_KEYS: [&str; 2] = ["r", "restart"];
const QUIT_KEYS: [&str; 2] = ["q", "quit"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Pick(Pick),
    /// Start the current tier over.
    Restart,
    /// Stop sorting and keep what is finished.
    Quit,
}

#[derive(Debug, Clone)]
pub struct KeyBindings {
    first: Vec<String>,
    second: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            first: DEFAULT_FIRST_KEYS.iter().map(|k| k.to_string()).collect(),
            second: DEFAULT_SECOND_KEYS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl KeyBindings {
    pub fn new(first: Vec<String>, second: Vec<String>) -> Result<Self> {
        let clean = |keys: Vec<String>| -> Vec<String> {
            keys.into_iter()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect()
        };
        let first = clean(first);
        let second = clean(second);

        if first.is_empty() || second.is_empty() {
            bail!("Both first_keys and second_keys need at least one non-blank key");
        }
        for key in &first {
            if contains_key(&second, key) {
                bail!("Key \"{key}\" is bound to both the first and the second item");
            }
        }
        for key in first.iter().chain(&second) {
            if contains_key(&RESTART_KEYS, key) || contains_key(&QUIT_KEYS, key) {
                bail!("Key \"{key}\" is reserved for restart/quit");
            }
        }

        Ok(KeyBindings { first, second })
    }

    /// Config values replace the defaults side by side.
    pub fn from_config(cfg: &TierjudgeConfig) -> Result<Self> {
        let defaults = KeyBindings::default();
        KeyBindings::new(
            cfg.first_keys.clone().unwrap_or(defaults.first),
            cfg.second_keys.clone().unwrap_or(defaults.second),
        )
    }

    /// Resolve one line of input. Matching ignores ASCII case and
    /// surrounding whitespace.
    pub fn resolve(&self, token: &str) -> Option<Action> {
        let token = token.trim();
        if token == ARROW_LEFT || contains_key(&self.first, token) {
            Some(Action::Pick(Pick::First))
        } else if token == ARROW_RIGHT || contains_key(&self.second, token) {
            Some(Action::Pick(Pick::Second))
        } else if contains_key(&RESTART_KEYS, token) {
            Some(Action::Restart)
        } else if contains_key(&QUIT_KEYS, token) {
            Some(Action::Quit)
        } else {
            None
        }
    }

    /// One-line reminder of the accepted inputs.
    pub fn hint(&self) -> String {
        format!(
            "Type {} for the first item or {} for the second ({} restarts the tier, {} quits)",
            self.first.join("/"),
            self.second.join("/"),
            RESTART_KEYS[0],
            QUIT_KEYS[0],
        )
    }

    pub fn first_label(&self) -> &str {
        &self.first[0]
    }

    pub fn second_label(&self) -> &str {
        &self.second[0]
    }
}

fn contains_key<S: AsRef<str>>(keys: &[S], token: &str) -> bool {
    keys.iter().any(|k| k.as_ref().eq_ignore_ascii_case(token))
}
