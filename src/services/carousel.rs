// src/services/carousel.rs

use std::time::Duration;

use tokio::{sync::watch, task::JoinHandle};

// Sequência fixa de imagens do carrossel, na ordem de exibição.
pub const CAROUSEL_IMAGES: [&str; 5] = [
    "/Pilates1.png",
    "/Pilates2.png",
    "/Pilates3.png",
    "/Pilates4.png",
    "/Pilates5.png",
];

// Intervalo do avanço automático.
pub const ROTATION_INTERVAL: Duration = Duration::from_secs(5);

/// Índice de rotação sobre uma sequência fixa. A aritmética envolve módulo
/// nos dois sentidos: não há extremos mortos nem saturação.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotation {
    index: usize,
    len: usize,
}

impl Rotation {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn advance(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    pub fn retreat(&mut self) {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
    }

    pub fn select(&mut self, index: usize) {
        if self.len > 0 {
            self.index = index % self.len;
        }
    }
}

/// Avanço automático do carrossel como aquisição escopada: a tarefa
/// repetitiva é abortada no drop, incondicionalmente, mesmo com um avanço em
/// voo. Quem segura o `Ticker` "montou" o carrossel; soltar é desmontar.
///
/// A navegação manual não passa por aqui e não reinicia o intervalo: o
/// relógio automático segue correndo independente dela (comportamento da
/// interface original, mantido).
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    pub fn spawn(len: usize, period: Duration) -> (Self, watch::Receiver<usize>) {
        let (tx, rx) = watch::channel(0usize);
        let handle = tokio::spawn(async move {
            let mut rotation = Rotation::new(len);
            let mut interval = tokio::time::interval(period);
            // O primeiro tick do interval é imediato; consome para que o
            // primeiro avanço aconteça só depois de um período completo.
            interval.tick().await;
            loop {
                interval.tick().await;
                rotation.advance();
                if tx.send(rotation.index()).is_err() {
                    break;
                }
            }
        });
        (Self { handle }, rx)
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
