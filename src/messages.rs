use std::{sync::Arc, time::Duration};

use tokio::{sync::RwLock, time::MissedTickBehavior};

use crate::constants::MESSAGE_ROTATION_SECS;

pub const FUNNY_MESSAGES: [&str; 12] = [
    "Lembra do nosso acordo? A fatura chegou! 💸",
    "O Pix da felicidade está aqui! 🎉",
    "Amigo que é amigo paga a conta! 😂",
    "A gente ama você, mas sua dívida não! ❤️💔",
    "Um dia a conta chega, hoje chegou a sua! ⏰",
    "O valor é baixo, mas a amizade é alta. Paga logo! 🤝💰",
    "Sua dívida está fazendo aniversário! 🎂🎈",
    "O PIX não morde, pode mandar! 🦷💳",
    "Hora de transformar promessa em PIX! ✨💸",
    "Sua consciência pesada? Liberte-se pagando! 😇💰",
    "O dinheiro não cresce em árvore, mas sua dívida sim! 🌳📈",
    "Pagar dívida é como academia: quanto mais espera, pior fica! 💪😅",
];

/// Cyclic cursor over [`FUNNY_MESSAGES`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageTicker {
    index: usize,
}

impl MessageTicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn tick(&mut self) {
        self.index = (self.index + 1) % FUNNY_MESSAGES.len();
    }

    pub fn current(&self) -> &'static str {
        FUNNY_MESSAGES[self.index]
    }

    /// `n` consecutive messages starting at the current one, wrapping around.
    pub fn window(&self, n: usize) -> Vec<&'static str> {
        (0..n)
            .map(|offset| FUNNY_MESSAGES[(self.index + offset) % FUNNY_MESSAGES.len()])
            .collect()
    }
}

pub type SharedTicker = Arc<RwLock<MessageTicker>>;

pub fn spawn_rotation(ticker: SharedTicker) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let period = Duration::from_secs(MESSAGE_ROTATION_SECS);
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            ticker.write().await.tick();
        }
    })
}
