//! Touch, Action, Outcome and TeamSide: one ball contact and how it is classified.

use serde::{Deserialize, Serialize};

/// Which side of the net a touch (or a point) belongs to.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Home,
    Away,
    /// Team string matched neither side token.
    #[default]
    Unknown,
}

impl TeamSide {
    pub fn is_known(self) -> bool {
        self != TeamSide::Unknown
    }
}

/// The two opaque team tokens of a match (e.g. club names from the export).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Sides {
    pub home: String,
    pub away: String,
}

impl Default for Sides {
    fn default() -> Self {
        Self::new("home", "away")
    }
}

impl Sides {
    pub fn new(home: impl Into<String>, away: impl Into<String>) -> Self {
        Self {
            home: home.into(),
            away: away.into(),
        }
    }

    /// Map a free-text team string to a side: exact or substring match (case-insensitive)
    /// against each token, home first. The plain words `home`/`away` always resolve.
    pub fn resolve(&self, text: &str) -> TeamSide {
        let text = text.trim().to_lowercase();
        if text.is_empty() {
            return TeamSide::Unknown;
        }
        if text == "home" {
            return TeamSide::Home;
        }
        if text == "away" {
            return TeamSide::Away;
        }
        let matches = |token: &str| {
            let token = token.trim().to_lowercase();
            !token.is_empty() && (text == token || text.contains(&token))
        };
        if matches(&self.home) {
            TeamSide::Home
        } else if matches(&self.away) {
            TeamSide::Away
        } else {
            TeamSide::Unknown
        }
    }
}

/// Result of a single contact.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Error,
    /// Ace, kill or stuff block: the rally ended in this player's favour.
    Point,
    Perfect,
    Positive,
    /// Ball stays in play.
    Continue,
}

impl Outcome {
    /// Outcome from free text, matched on whole words. `error` wins over everything else.
    fn parse(text: &str) -> Self {
        let words: Vec<&str> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        let has = |candidates: &[&str]| words.iter().any(|w| candidates.contains(w));
        if has(&["error", "errors"]) {
            Outcome::Error
        } else if has(&["ace", "aces", "kill", "kills", "score", "scored", "point"]) {
            Outcome::Point
        } else if has(&["perfect"]) {
            Outcome::Perfect
        } else if has(&["positive", "good"]) {
            Outcome::Positive
        } else {
            Outcome::Continue
        }
    }

    /// Outcome from an export `Result` label.
    fn from_result(result: &str) -> Self {
        match result.trim().to_lowercase().as_str() {
            "error" => Outcome::Error,
            "ace" | "kill" | "point" | "score" => Outcome::Point,
            "perfect" => Outcome::Perfect,
            "positive" | "good" => Outcome::Positive,
            _ => Outcome::Continue,
        }
    }

    fn word(self) -> Option<&'static str> {
        match self {
            Outcome::Error => Some("error"),
            Outcome::Point => Some("kill"),
            Outcome::Perfect => Some("perfect"),
            Outcome::Positive => Some("positive"),
            Outcome::Continue => None,
        }
    }
}

/// Closed classification of a touch, assigned once at ingestion.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "outcome", rename_all = "snake_case")]
pub enum Action {
    Serve(Outcome),
    Pass(Outcome),
    Attack(Outcome),
    Block(Outcome),
    Dig(Outcome),
    Set,
    /// Contact type the classifier does not know (freeball, substitution marker, ...).
    Other,
}

#[derive(Clone, Copy)]
enum Kind {
    Serve,
    Pass,
    Attack,
    Block,
    Dig,
    Set,
}

impl Kind {
    /// First matching kind wins, so `"block error"` can never also count as something else.
    fn detect(text: &str) -> Option<Self> {
        const RULES: [(&[&str], Kind); 6] = [
            (&["serve", "service"], Kind::Serve),
            (&["pass", "reception", "receive"], Kind::Pass),
            (&["attack", "spike"], Kind::Attack),
            (&["block"], Kind::Block),
            (&["dig", "defense", "defence"], Kind::Dig),
            (&["set"], Kind::Set),
        ];
        RULES
            .iter()
            .find(|(words, _)| words.iter().any(|w| text.contains(w)))
            .map(|(_, kind)| *kind)
    }

    fn with(self, outcome: Outcome) -> Action {
        match self {
            Kind::Serve => Action::Serve(outcome),
            Kind::Pass => Action::Pass(outcome),
            Kind::Attack => Action::Attack(outcome),
            Kind::Block => Action::Block(outcome),
            Kind::Dig => Action::Dig(outcome),
            Kind::Set => Action::Set,
        }
    }
}

impl Action {
    /// Classify a free-text action label such as `"attack kill"` or `"Reception Perfect"`.
    pub fn parse(text: &str) -> Self {
        let text = text.to_lowercase();
        match Kind::detect(&text) {
            Some(kind) => kind.with(Outcome::parse(&text)),
            None => Action::Other,
        }
    }

    /// Classify an export record from its `Action Type` and `Result` labels.
    /// A `Perfect` serve, attack or block ended the rally, so it counts as a point.
    pub fn from_feed(action_type: &str, result: &str) -> Self {
        let Some(kind) = Kind::detect(&action_type.to_lowercase()) else {
            return Action::Other;
        };
        let outcome = match (kind, Outcome::from_result(result)) {
            (Kind::Serve | Kind::Attack | Kind::Block, Outcome::Perfect) => Outcome::Point,
            (_, outcome) => outcome,
        };
        kind.with(outcome)
    }

    pub fn outcome(self) -> Option<Outcome> {
        match self {
            Action::Serve(o) | Action::Pass(o) | Action::Attack(o) | Action::Block(o) | Action::Dig(o) => Some(o),
            Action::Set | Action::Other => None,
        }
    }

    pub fn is_attack(self) -> bool {
        matches!(self, Action::Attack(_))
    }

    /// Lower-case label; `Action::parse(&a.label()) == a` for every variant.
    pub fn label(self) -> String {
        let (kind, outcome) = match self {
            Action::Serve(o) => ("serve", o),
            Action::Pass(o) => ("pass", o),
            Action::Attack(o) => ("attack", o),
            Action::Block(o) => ("block", o),
            Action::Dig(o) => ("dig", o),
            Action::Set => return "set".to_string(),
            Action::Other => return "other".to_string(),
        };
        match outcome.word() {
            Some(word) => format!("{kind} {word}"),
            None => kind.to_string(),
        }
    }
}

/// One ball contact inside a rally.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Touch {
    pub action: Action,
    pub player: String,
    /// Jersey number as exported (may be empty).
    #[serde(default)]
    pub number: String,
    pub team: TeamSide,
}

impl Touch {
    pub fn new(action: Action, player: impl Into<String>, team: TeamSide) -> Self {
        Self {
            action,
            player: player.into(),
            number: String::new(),
            team,
        }
    }

    /// Build a touch from free-text action and team strings (resolved against `sides`).
    pub fn from_text(action: &str, player: impl Into<String>, team: &str, sides: &Sides) -> Self {
        Self::new(Action::parse(action), player, sides.resolve(team))
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = number.into();
        self
    }
}
