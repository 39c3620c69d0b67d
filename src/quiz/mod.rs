pub mod deck;
pub mod loader;

pub use deck::{CardStatus, Choice, Deck, QuestionCard};
pub use loader::load_deck;
