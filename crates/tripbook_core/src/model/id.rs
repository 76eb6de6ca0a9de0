//! Identifier generation for trips and their nested entities.
//!
//! The default provider produces short base-36 ids. They are not
//! collision-free; callers needing stronger uniqueness switch to
//! [`UuidIdProvider`] through [`IdStrategy`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

const SHORT_ID_LEN: usize = 8;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Source of fresh entity ids.
pub trait IdProvider {
    fn next_id(&self) -> String;
}

impl<T: IdProvider + ?Sized> IdProvider for Box<T> {
    fn next_id(&self) -> String {
        (**self).next_id()
    }
}

/// Eight lowercase base-36 characters drawn from a random v4 uuid.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortIdProvider;

impl IdProvider for ShortIdProvider {
    fn next_id(&self) -> String {
        let mut bits = Uuid::new_v4().as_u128();
        let mut id = String::with_capacity(SHORT_ID_LEN);
        for _ in 0..SHORT_ID_LEN {
            id.push(char::from(BASE36[(bits % 36) as usize]));
            bits /= 36;
        }
        id
    }
}

/// Hyphenated random v4 uuid.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdProvider;

impl IdProvider for UuidIdProvider {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Configurable choice of id provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    #[default]
    Short,
    Uuid,
}

impl IdStrategy {
    pub fn provider(self) -> Box<dyn IdProvider> {
        match self {
            Self::Short => Box::new(ShortIdProvider),
            Self::Uuid => Box::new(UuidIdProvider),
        }
    }
}
