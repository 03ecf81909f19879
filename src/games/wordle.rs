//! Wordle: guess a five-letter word in six tries.
//!
//! # Scoring
//!
//! Guesses are scored in two passes over a mutable copy of the target:
//!
//! ```text
//! pass 1:  guess[i] == target[i]        -> Correct, blank target[i]
//! pass 2:  guess[i] anywhere in target  -> Present, blank that occurrence
//!          otherwise                    -> Absent
//! ```
//!
//! Blanking consumed letters means a letter repeated in the guess is only
//! credited as many times as it occurs in the target.

use std::collections::HashSet;

use serde::Deserialize;

use super::random::RandomSource;
use super::GameOutcome;

/// Letters per word.
pub const WORD_LENGTH: usize = 5;

/// Rows on the board.
pub const MAX_ROWS: usize = 6;

/// Built-in words used when no word list can be loaded.
pub const FALLBACK_WORDS: [&str; 5] = ["HAPPY", "PARTY", "SMILE", "CHEER", "SWEET"];

/// Classification of one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LetterState {
    Correct,
    Present,
    Absent,
    /// Not yet played
    #[default]
    Empty,
}

impl LetterState {
    /// Lowercase state name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Present => "present",
            Self::Absent => "absent",
            Self::Empty => "empty",
        }
    }
}

/// One letter cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tile {
    /// Uppercase letter, `None` for an empty tile
    pub letter: Option<char>,
    pub state: LetterState,
}

impl Tile {
    /// Tile holding `letter`.
    pub fn new(letter: char, state: LetterState) -> Self {
        Self {
            letter: Some(letter),
            state,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "letter": self.letter.map(String::from).unwrap_or_default(),
            "state": self.state.as_str()
        })
    }
}

/// Score `guess` against `target`, comparing case-insensitively.
///
/// Returns one tile per guess letter. Letters past the end of a shorter
/// target are `Absent`.
pub fn score_guess(target: &str, guess: &str) -> Vec<Tile> {
    let mut remaining: Vec<Option<char>> = target
        .chars()
        .map(|c| Some(c.to_ascii_uppercase()))
        .collect();
    let letters: Vec<char> = guess.chars().map(|c| c.to_ascii_uppercase()).collect();
    let mut tiles: Vec<Tile> = letters
        .iter()
        .map(|&c| Tile::new(c, LetterState::Absent))
        .collect();

    for (i, &letter) in letters.iter().enumerate() {
        if let Some(slot) = remaining.get_mut(i) {
            if *slot == Some(letter) {
                tiles[i].state = LetterState::Correct;
                *slot = None;
            }
        }
    }

    for (i, &letter) in letters.iter().enumerate() {
        if tiles[i].state == LetterState::Correct {
            continue;
        }
        if let Some(slot) = remaining.iter_mut().find(|slot| **slot == Some(letter)) {
            tiles[i].state = LetterState::Present;
            *slot = None;
        }
    }

    tiles
}

/// Dictionary loading errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionaryError {
    /// Source was not a JSON list of `{ "word": ... }` entries
    Parse(String),
    /// No entry had exactly five letters
    NoCandidates,
}

impl std::fmt::Display for DictionaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "Word list is not valid JSON: {}", msg),
            Self::NoCandidates => write!(f, "Word list has no five-letter words"),
        }
    }
}

impl std::error::Error for DictionaryError {}

#[derive(Debug, Deserialize)]
struct WordEntry {
    word: String,
}

/// Five-letter words accepted as guesses and drawn as targets.
#[derive(Debug, Clone)]
pub struct Dictionary {
    words: Vec<String>,
    index: HashSet<String>,
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::fallback()
    }
}

impl Dictionary {
    /// Build from raw words, keeping only five-letter ones.
    pub fn from_words<I, S>(words: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Vec::new();
        let mut index = HashSet::new();
        for word in words {
            let word = word.as_ref().trim().to_ascii_uppercase();
            if !is_candidate(&word) {
                continue;
            }
            if index.insert(word.clone()) {
                list.push(word);
            }
        }

        if list.is_empty() {
            return Err(DictionaryError::NoCandidates);
        }

        Ok(Self { words: list, index })
    }

    /// Parse a JSON word list: `[{ "word": "happy", ... }, ...]`.
    pub fn from_json(raw: &str) -> Result<Self, DictionaryError> {
        let entries: Vec<WordEntry> =
            serde_json::from_str(raw).map_err(|e| DictionaryError::Parse(e.to_string()))?;
        Self::from_words(entries.into_iter().map(|e| e.word))
    }

    /// The built-in word set.
    pub fn fallback() -> Self {
        let words: Vec<String> = FALLBACK_WORDS.iter().map(|w| w.to_string()).collect();
        let index = words.iter().cloned().collect();
        Self { words, index }
    }

    /// Parse `raw` if present, falling back to the built-in set on any failure.
    pub fn load_or_fallback(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            tracing::warn!("word list unavailable, using fallback words");
            return Self::fallback();
        };
        match Self::from_json(raw) {
            Ok(dictionary) => {
                tracing::debug!(words = dictionary.len(), "word list loaded");
                dictionary
            }
            Err(err) => {
                tracing::warn!(error = %err, "word list rejected, using fallback words");
                Self::fallback()
            }
        }
    }

    /// Case-insensitive membership.
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains(&word.to_ascii_uppercase())
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True if no words survived filtering.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in load order, uppercased.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Draw a target uniformly.
    pub fn draw(&self, rng: &mut dyn RandomSource) -> &str {
        let len = self.words.len();
        &self.words[rng.pick_index(len) % len]
    }
}

fn is_candidate(word: &str) -> bool {
    word.len() == WORD_LENGTH && word.chars().all(|c| c.is_ascii_alphabetic())
}

/// How a submission ended the game, if it did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Terminal {
    Won,
    /// Out of rows; carries the target so it can be revealed
    Lost { target: String },
}

/// Result of a scored row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub row: Vec<Tile>,
    /// Index of the row just recorded
    pub row_index: usize,
    pub terminal: Option<Terminal>,
}

/// Wordle submission errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordleError {
    WrongLength(usize),
    NotInDictionary(String),
    GameOver,
}

impl WordleError {
    /// True for rejected input that should prompt a "try again" shake.
    pub fn is_invalid_guess(&self) -> bool {
        matches!(self, Self::WrongLength(_) | Self::NotInDictionary(_))
    }
}

impl std::fmt::Display for WordleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongLength(n) => {
                write!(f, "Guess must be {} letters, got {}", WORD_LENGTH, n)
            }
            Self::NotInDictionary(w) => write!(f, "'{}' is not in the word list", w),
            Self::GameOver => write!(f, "Game is over, retry to play again"),
        }
    }
}

impl std::error::Error for WordleError {}

/// Board state for one playthrough.
#[derive(Debug, Clone)]
pub struct WordleGame {
    target: String,
    rows: Vec<Vec<Tile>>,
    current_guess: String,
    outcome: GameOutcome,
}

impl WordleGame {
    /// Start with a target drawn from `dictionary`.
    pub fn new(dictionary: &Dictionary, rng: &mut dyn RandomSource) -> Self {
        Self::with_target(dictionary.draw(rng))
    }

    /// Start with a known target.
    pub fn with_target(target: &str) -> Self {
        Self {
            target: target.to_ascii_uppercase(),
            rows: Vec::with_capacity(MAX_ROWS),
            current_guess: String::new(),
            outcome: GameOutcome::Pending,
        }
    }

    /// Where the game stands.
    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    /// Row the next guess will land in.
    pub fn current_row(&self) -> usize {
        self.rows.len().min(MAX_ROWS - 1)
    }

    /// Submitted rows, oldest first.
    pub fn rows(&self) -> &[Vec<Tile>] {
        &self.rows
    }

    /// Letters typed into the current row.
    pub fn current_guess(&self) -> &str {
        &self.current_guess
    }

    /// Target word, only once the game is over.
    pub fn revealed_target(&self) -> Option<&str> {
        self.outcome.is_terminal().then_some(self.target.as_str())
    }

    /// Full 6x5 board with unplayed tiles marked `Empty`.
    pub fn board(&self) -> Vec<Vec<Tile>> {
        let mut board = self.rows.clone();
        if board.len() < MAX_ROWS && !self.outcome.is_terminal() {
            let mut pending: Vec<Tile> = self
                .current_guess
                .chars()
                .map(|c| Tile::new(c, LetterState::Empty))
                .collect();
            pending.resize(WORD_LENGTH, Tile::default());
            board.push(pending);
        }
        board.resize(MAX_ROWS, vec![Tile::default(); WORD_LENGTH]);
        board
    }

    /// Append a letter to the typing buffer. Returns false if ignored.
    pub fn type_letter(&mut self, letter: char) -> bool {
        if self.outcome.is_terminal()
            || !letter.is_ascii_alphabetic()
            || self.current_guess.len() >= WORD_LENGTH
        {
            return false;
        }
        self.current_guess.push(letter.to_ascii_uppercase());
        true
    }

    /// Drop the last typed letter.
    pub fn backspace(&mut self) -> bool {
        if self.outcome.is_terminal() {
            return false;
        }
        self.current_guess.pop().is_some()
    }

    /// Submit the typing buffer. The buffer is cleared only when the row is
    /// accepted.
    pub fn submit_current(&mut self, dictionary: &Dictionary) -> Result<Submission, WordleError> {
        let guess = self.current_guess.clone();
        let submission = self.submit(&guess, dictionary)?;
        self.current_guess.clear();
        Ok(submission)
    }

    /// Score and record a guess.
    pub fn submit(&mut self, guess: &str, dictionary: &Dictionary) -> Result<Submission, WordleError> {
        if self.outcome.is_terminal() {
            return Err(WordleError::GameOver);
        }

        let guess = guess.trim().to_ascii_uppercase();
        let length = guess.chars().count();
        if length != WORD_LENGTH {
            return Err(WordleError::WrongLength(length));
        }
        if !dictionary.contains(&guess) {
            return Err(WordleError::NotInDictionary(guess));
        }

        let row = score_guess(&self.target, &guess);
        let row_index = self.rows.len();
        self.rows.push(row.clone());

        let terminal = if guess == self.target {
            self.outcome = GameOutcome::Won;
            Some(Terminal::Won)
        } else if self.rows.len() >= MAX_ROWS {
            self.outcome = GameOutcome::Lost;
            Some(Terminal::Lost {
                target: self.target.clone(),
            })
        } else {
            None
        };

        Ok(Submission {
            row,
            row_index,
            terminal,
        })
    }

    /// New target, empty board.
    pub fn retry(&mut self, dictionary: &Dictionary, rng: &mut dyn RandomSource) {
        *self = Self::new(dictionary, rng);
    }

    pub fn to_json(&self) -> serde_json::Value {
        let board: Vec<serde_json::Value> = self
            .board()
            .iter()
            .map(|row| serde_json::Value::Array(row.iter().map(Tile::to_json).collect()))
            .collect();
        let mut obj = serde_json::json!({
            "board": board,
            "current_row": self.current_row(),
            "current_guess": self.current_guess,
            "outcome": self.outcome.as_str()
        });
        if let Some(target) = self.revealed_target() {
            obj["target"] = serde_json::json!(target);
        }
        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::random::ScriptedSource;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    use super::LetterState::{Absent, Correct, Present};

    fn states(tiles: &[Tile]) -> Vec<LetterState> {
        tiles.iter().map(|t| t.state).collect()
    }

    fn dictionary() -> Dictionary {
        Dictionary::from_words([
            "allow", "lolly", "happy", "party", "smile", "cheer", "sweet", "hello", "llama",
        ])
        .unwrap()
    }

    #[test]
    fn test_score_duplicate_letters() {
        let tiles = score_guess("ALLOW", "LOLLY");
        assert_eq!(states(&tiles), vec![Present, Present, Correct, Absent, Absent]);
    }

    #[test]
    fn test_score_exact_and_miss() {
        assert_eq!(states(&score_guess("HAPPY", "happy")), vec![Correct; 5]);
        assert_eq!(
            states(&score_guess("SMILE", "PARTY")),
            vec![Absent; 5]
        );
    }

    #[test]
    fn test_score_correct_takes_priority_over_present() {
        // The second E is exact, so the first E finds nothing left
        let tiles = score_guess("BEACH", "EERIE");
        assert_eq!(states(&tiles), vec![Absent, Correct, Absent, Absent, Absent]);

        let tiles = score_guess("SWEET", "EERIE");
        assert_eq!(states(&tiles), vec![Present, Present, Absent, Absent, Absent]);
    }

    #[test]
    fn test_score_never_overcredits_letters() {
        let words = ["ALLOW", "LOLLY", "LLAMA", "SWEET", "EERIE", "HAPPY", "PAPPY", "ABBEY"];
        for target in words {
            for guess in words {
                let tiles = score_guess(target, guess);
                assert_eq!(tiles.len(), target.len());

                let mut credited: HashMap<char, usize> = HashMap::new();
                for tile in &tiles {
                    assert_ne!(tile.state, LetterState::Empty);
                    if matches!(tile.state, Correct | Present) {
                        *credited.entry(tile.letter.unwrap()).or_default() += 1;
                    }
                }
                for (letter, count) in credited {
                    let in_target = target.chars().filter(|c| *c == letter).count();
                    assert!(count <= in_target, "{guess} vs {target}: {letter}");
                }
            }
        }
    }

    #[test]
    fn test_dictionary_filters_and_uppercases() {
        let dict = Dictionary::from_json(
            r#"[{"word": "happy"}, {"word": "cake"}, {"word": "balloon"}, {"word": "Party", "pos": "noun"}]"#,
        )
        .unwrap();

        assert_eq!(dict.words(), &["HAPPY".to_string(), "PARTY".to_string()]);
        assert!(dict.contains("happy"));
        assert!(dict.contains("PaRtY"));
        assert!(!dict.contains("cake"));
    }

    #[test]
    fn test_dictionary_errors() {
        assert!(matches!(
            Dictionary::from_json("not json"),
            Err(DictionaryError::Parse(_))
        ));
        assert_eq!(
            Dictionary::from_json(r#"[{"word": "cake"}]"#).unwrap_err(),
            DictionaryError::NoCandidates
        );
    }

    #[test]
    fn test_dictionary_falls_back() {
        let from_missing = Dictionary::load_or_fallback(None);
        let from_garbage = Dictionary::load_or_fallback(Some("{"));
        let from_empty = Dictionary::load_or_fallback(Some("[]"));

        for dict in [from_missing, from_garbage, from_empty] {
            assert_eq!(dict.len(), FALLBACK_WORDS.len());
            assert!(dict.contains("cheer"));
        }
    }

    #[test]
    fn test_invalid_guesses_consume_no_row() {
        let dict = dictionary();
        let mut game = WordleGame::with_target("allow");

        assert_eq!(game.submit("abc", &dict), Err(WordleError::WrongLength(3)));
        assert_eq!(
            game.submit("zzzzz", &dict),
            Err(WordleError::NotInDictionary("ZZZZZ".to_string()))
        );
        assert!(game.rows().is_empty());
        assert_eq!(game.current_row(), 0);
    }

    #[test]
    fn test_win_records_row() {
        let dict = dictionary();
        let mut game = WordleGame::with_target("ALLOW");

        let first = game.submit("lolly", &dict).unwrap();
        assert_eq!(first.terminal, None);
        assert_eq!(game.current_row(), 1);

        let second = game.submit("allow", &dict).unwrap();
        assert_eq!(second.terminal, Some(Terminal::Won));
        assert_eq!(second.row_index, 1);
        assert_eq!(game.outcome(), GameOutcome::Won);
        assert_eq!(game.submit("happy", &dict), Err(WordleError::GameOver));
    }

    #[test]
    fn test_sixth_miss_reveals_target() {
        let dict = dictionary();
        let mut game = WordleGame::with_target("ALLOW");

        for _ in 0..5 {
            assert_eq!(game.submit("happy", &dict).unwrap().terminal, None);
        }
        let last = game.submit("smile", &dict).unwrap();

        assert_eq!(
            last.terminal,
            Some(Terminal::Lost {
                target: "ALLOW".to_string()
            })
        );
        assert_eq!(game.revealed_target(), Some("ALLOW"));
        assert_eq!(game.rows().len(), MAX_ROWS);
    }

    #[test]
    fn test_submitted_rows_are_frozen() {
        let dict = dictionary();
        let mut game = WordleGame::with_target("ALLOW");
        game.submit("lolly", &dict).unwrap();
        let before = game.rows()[0].clone();

        game.submit("hello", &dict).unwrap();

        assert_eq!(game.rows()[0], before);
    }

    #[test]
    fn test_typing_buffer() {
        let dict = dictionary();
        let mut game = WordleGame::with_target("HAPPY");

        for c in "partyx".chars() {
            game.type_letter(c);
        }
        assert_eq!(game.current_guess(), "PARTY");
        assert!(!game.type_letter('1'));

        game.backspace();
        assert_eq!(
            game.submit_current(&dict),
            Err(WordleError::WrongLength(4))
        );
        assert_eq!(game.current_guess(), "PART");

        game.type_letter('y');
        game.submit_current(&dict).unwrap();
        assert_eq!(game.current_guess(), "");
    }

    #[test]
    fn test_board_shape() {
        let dict = dictionary();
        let mut game = WordleGame::with_target("HAPPY");
        game.submit("party", &dict).unwrap();
        game.type_letter('h');

        let board = game.board();

        assert_eq!(board.len(), MAX_ROWS);
        assert!(board.iter().all(|row| row.len() == WORD_LENGTH));
        assert_eq!(board[1][0].letter, Some('H'));
        assert_eq!(board[1][0].state, LetterState::Empty);
        assert_eq!(board[5][4], Tile::default());
    }

    #[test]
    fn test_retry_draws_new_target() {
        let dict = dictionary();
        let mut rng = ScriptedSource::new([0, 2]);
        let mut game = WordleGame::new(&dict, &mut rng);
        game.submit("lolly", &dict).unwrap();

        game.retry(&dict, &mut rng);

        assert!(game.rows().is_empty());
        assert_eq!(game.outcome(), GameOutcome::Pending);
        assert_eq!(
            game.submit("happy", &dict).unwrap().terminal,
            Some(Terminal::Won)
        );
    }
}
