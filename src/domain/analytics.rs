// Static model analytics shown on the analytics tab

#[derive(Debug, Clone, Copy)]
pub struct LossPoint {
    pub epoch: u32,
    pub loss: f64,
    pub val_loss: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct Share {
    pub name: &'static str,
    pub percent: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct ModelScores {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

pub const LOSS_CURVE: [LossPoint; 6] = [
    LossPoint { epoch: 1, loss: 0.12, val_loss: 0.15 },
    LossPoint { epoch: 10, loss: 0.08, val_loss: 0.10 },
    LossPoint { epoch: 20, loss: 0.05, val_loss: 0.07 },
    LossPoint { epoch: 30, loss: 0.03, val_loss: 0.05 },
    LossPoint { epoch: 40, loss: 0.02, val_loss: 0.04 },
    LossPoint { epoch: 50, loss: 0.015, val_loss: 0.03 },
];

pub const DISTRIBUTION: [Share; 2] = [
    Share { name: "Normal", percent: 85 },
    Share { name: "Anomaly", percent: 15 },
];

pub const SCORES: ModelScores = ModelScores {
    precision: 0.942,
    recall: 0.887,
    f1: 0.914,
};

/// Landing page system specification rows.
pub const SYSTEM_SPECS: [(&str, &str); 8] = [
    ("Model Type", "LSTM Autoencoder"),
    ("Latent Dim", "32 Neurons"),
    ("Optimization", "ADAM Adaptive"),
    ("Activation", "ReLU / Tanh"),
    ("Primary Source", "NASA MSL / SMAP"),
    ("Sequence Size", "100 Frames"),
    ("Feature Matrix", "Multivariate"),
    ("Precision", "Float32 Deep"),
];
