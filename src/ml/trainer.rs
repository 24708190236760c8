// ============================================================
// Layer 5 — Adversarial Training Loop
// ============================================================
// Two networks, two Adam optimisers, one batch at a time:
//
//   1. Discriminator on real pairs   D(y ++ y)        → 1
//   2. Discriminator on fake pairs   D(G(x)ᵀ ++ y)    → 0
//      (G(x) detached so only D receives gradients)
//      Adam step on D with loss_real + loss_fake
//   3. Classifier through the updated D
//                                    D'(G(x) ++ y)    → 1
//      Adam step on G
//
// Binary cross-entropy is computed on the discriminator's
// logits; with_logits(true) folds the sigmoid into the loss.
//
// Key Burn insight:
//   - optimiser.step() consumes the module and returns the
//     updated one, so both networks are threaded through
//     every function by value
//   - model.valid() returns the model on the inner backend
//     for evaluation, with no autodiff overhead
//
// Reference: Burn Book §5, Goodfellow et al. (2014), Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    data::dataloader::{DataLoader, DataLoaderBuilder},
    module::AutodiffModule,
    nn::loss::BinaryCrossEntropyLossConfig,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};
use std::path::PathBuf;

use crate::application::run_use_case::RunConfig;
use crate::data::{batcher::{DigitBatch, DigitBatcher}, dataset::DigitDataset};
use crate::infra::{
    checkpoint::CheckpointManager,
    metrics::{EpochMetrics, MetricsLogger},
};
use crate::ml::evaluator::{evaluate, Accuracy};
use crate::ml::model::{class_pair, Classifier, ClassifierConfig, Discriminator, DiscriminatorConfig};

/// Losses of one adversarial step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepLosses {
    /// loss_real + loss_fake
    pub d_loss: f64,
    pub g_loss: f64,
    /// Mean D(y ++ y) before the update, as a probability
    pub d_real: f64,
}

/// Mean losses over one epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochLosses {
    pub d_loss:  f64,
    pub g_loss:  f64,
    pub batches: usize,
}

/// What a whole run produced.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Accuracy of the most recent evaluation, if any ran
    pub last_accuracy: Option<Accuracy>,
    /// Every checkpoint written, in order
    pub checkpoints:   Vec<PathBuf>,
}

pub fn adversarial_step<B, OG, OD>(
    classifier:    Classifier<B>,
    discriminator: Discriminator<B>,
    optim_g:       &mut OG,
    optim_d:       &mut OD,
    batch:         DigitBatch<B>,
    lr:            f64,
) -> (Classifier<B>, Discriminator<B>, StepLosses)
where
    B:  AutodiffBackend,
    OG: Optimizer<Classifier<B>, B>,
    OD: Optimizer<Discriminator<B>, B>,
{
    let device = batch.images.device();
    let [batch_size, _] = batch.images.dims();

    let bce = BinaryCrossEntropyLossConfig::new()
        .with_logits(true)
        .init(&device);
    let real_label = Tensor::<B, 2, Int>::ones([batch_size, 1], &device);
    let fake_label = Tensor::<B, 2, Int>::zeros([batch_size, 1], &device);

    // ── Discriminator update ─────────────────────────────────────────────────
    let real_pair = class_pair(batch.one_hot.clone(), batch.one_hot.clone());
    let d_real: f64 = discriminator
        .forward(real_pair.clone())
        .detach()
        .mean()
        .into_scalar()
        .elem::<f64>();
    let loss_real = bce.forward(discriminator.forward_logits(real_pair), real_label.clone());

    let y_pred    = classifier.forward(batch.images);
    let fake_pair = class_pair(y_pred.clone().detach(), batch.one_hot.clone());
    let loss_fake = bce.forward(discriminator.forward_logits(fake_pair), fake_label);

    let loss_d = loss_real + loss_fake;
    let d_loss: f64 = loss_d.clone().into_scalar().elem::<f64>();

    let grads = loss_d.backward();
    let grads = GradientsParams::from_grads(grads, &discriminator);
    let discriminator = optim_d.step(lr, discriminator, grads);

    // ── Classifier update ────────────────────────────────────────────────────
    // Judged by the discriminator that was just updated
    let gen_pair = class_pair(y_pred, batch.one_hot);
    let loss_g   = bce.forward(discriminator.forward_logits(gen_pair), real_label);
    let g_loss: f64 = loss_g.clone().into_scalar().elem::<f64>();

    let grads = loss_g.backward();
    let grads = GradientsParams::from_grads(grads, &classifier);
    let classifier = optim_g.step(lr, classifier, grads);

    (classifier, discriminator, StepLosses { d_loss, g_loss, d_real })
}

/// One pass over the training loader.
#[allow(clippy::too_many_arguments)]
pub fn train_epoch<B, OG, OD>(
    mut classifier:    Classifier<B>,
    mut discriminator: Discriminator<B>,
    optim_g:           &mut OG,
    optim_d:           &mut OD,
    loader:            &dyn DataLoader<DigitBatch<B>>,
    num_batches:       usize,
    epoch:             usize,
    cfg:               &RunConfig,
) -> (Classifier<B>, Discriminator<B>, EpochLosses)
where
    B:  AutodiffBackend,
    OG: Optimizer<Classifier<B>, B>,
    OD: Optimizer<Discriminator<B>, B>,
{
    let mut d_sum   = 0.0f64;
    let mut g_sum   = 0.0f64;
    let mut batches = 0usize;

    for batch in loader.iter() {
        let (c, d, step) = adversarial_step(
            classifier, discriminator, optim_g, optim_d, batch, cfg.lr,
        );
        classifier    = c;
        discriminator = d;

        d_sum   += step.d_loss;
        g_sum   += step.g_loss;
        batches += 1;

        if should_log(batches, num_batches, cfg.log_interval) {
            tracing::info!(
                "[{}/{}][{}/{}] Loss_D: {:.4} Loss_G: {:.4} D(x): {:.4}",
                epoch, cfg.epochs, batches, num_batches, step.d_loss, step.g_loss, step.d_real,
            );
        }
    }

    let losses = if batches > 0 {
        EpochLosses { d_loss: d_sum / batches as f64, g_loss: g_sum / batches as f64, batches }
    } else {
        EpochLosses { d_loss: f64::NAN, g_loss: f64::NAN, batches }
    };

    (classifier, discriminator, losses)
}

/// Log every `log_interval`-th batch and always the last one.
fn should_log(batch: usize, num_batches: usize, log_interval: usize) -> bool {
    batch % log_interval == 0 || batch == num_batches
}

/// The epoch loop: train and/or evaluate, then checkpoint on schedule.
///
/// `train_dataset` is present when the mode trains and
/// `test_dataset` when it evaluates.
pub fn run_epochs<B: AutodiffBackend>(
    cfg:           &RunConfig,
    train_dataset: Option<DigitDataset>,
    test_dataset:  Option<DigitDataset>,
    ckpt_manager:  &CheckpointManager,
    metrics:       &MetricsLogger,
    device:        B::Device,
) -> Result<RunSummary> {

    // ── Build both networks ───────────────────────────────────────────────────
    let mut classifier: Classifier<B> = ClassifierConfig::new().init(&device);
    let mut discriminator: Discriminator<B> = DiscriminatorConfig::new().init(&device);

    if let Some(path) = &cfg.load_model {
        classifier = ckpt_manager.load_classifier(classifier, path, &device)?;
    }

    // ── Adam optimisers, one per network ──────────────────────────────────────
    let mut optim_g = AdamConfig::new().with_epsilon(1e-8).init::<B, Classifier<B>>();
    let mut optim_d = AdamConfig::new().with_epsilon(1e-8).init::<B, Discriminator<B>>();

    // ── Training data loader (AutodiffBackend) ────────────────────────────────
    let train_loader = train_dataset.map(|dataset| {
        let num_batches = dataset.batch_count(cfg.batch_size);
        tracing::info!("Training on {} samples, {} batches per epoch", dataset.sample_count(), num_batches);
        let loader = DataLoaderBuilder::new(DigitBatcher::<B>::new(device.clone()))
            .batch_size(cfg.batch_size)
            .shuffle(cfg.seed)
            .num_workers(1)
            .build(dataset);
        (loader, num_batches)
    });

    // ── Test data loader (InnerBackend — no autodiff overhead) ────────────────
    let test_loader = test_dataset.map(|dataset| {
        DataLoaderBuilder::new(DigitBatcher::<B::InnerBackend>::new(device.clone()))
            .batch_size(cfg.batch_size)
            .num_workers(1)
            .build(dataset)
    });

    let mut summary = RunSummary::default();

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {
        let mut row = EpochMetrics::new(epoch);

        if let Some((loader, num_batches)) = &train_loader {
            let (c, d, losses) = train_epoch(
                classifier, discriminator, &mut optim_g, &mut optim_d,
                loader.as_ref(), *num_batches, epoch, cfg,
            );
            classifier    = c;
            discriminator = d;

            println!(
                "Epoch {:>3}/{} | batches={} | Loss_D={:.4} | Loss_G={:.4}",
                epoch, cfg.epochs, losses.batches, losses.d_loss, losses.g_loss,
            );
            row = row.with_losses(losses.d_loss, losses.g_loss);
        }

        if let Some(loader) = &test_loader {
            if epoch % cfg.eval_interval == 0 {
                let acc = evaluate(&classifier.valid(), loader.as_ref());
                println!("Correct: {}", acc.correct);
                println!("Total: {}", acc.total);
                println!("Accuracy: {:.2}%", acc.ratio() * 100.0);
                row = row.with_accuracy(acc);
                summary.last_accuracy = Some(acc);
            }
        }

        if epoch % cfg.save_interval == 0 {
            let path = ckpt_manager.save_classifier(&classifier, epoch)?;
            tracing::info!("Checkpoint saved for epoch {} to '{}'", epoch, path.display());
            summary.checkpoints.push(path);
        }

        metrics.log(&row)?;
    }

    tracing::info!("Run complete");
    Ok(summary)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::{ndarray::NdArrayDevice, Autodiff, NdArray};
    use burn::data::dataloader::batcher::Batcher;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use crate::domain::{mode::Mode, sample::{DigitSample, IMAGE_PIXELS}};

    type TestBackend = Autodiff<NdArray>;

    /// Random images with labels cycling 0..=9.
    fn synthetic_samples(n: usize, seed: u64) -> Vec<DigitSample> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|i| {
                let pixels = (0..IMAGE_PIXELS).map(|_| rng.gen::<f32>()).collect();
                DigitSample::new(pixels, (i % 10) as u8)
            })
            .collect()
    }

    fn to_vec<B: Backend>(t: Tensor<B, 2>) -> Vec<f32> {
        t.into_data().convert::<f32>().to_vec::<f32>().unwrap()
    }

    #[test]
    fn test_adversarial_step_updates_both_networks() {
        let device = NdArrayDevice::Cpu;
        let classifier: Classifier<TestBackend> = ClassifierConfig::new().init(&device);
        let discriminator: Discriminator<TestBackend> = DiscriminatorConfig::new().init(&device);
        let mut optim_g = AdamConfig::new().init::<TestBackend, Classifier<TestBackend>>();
        let mut optim_d = AdamConfig::new().init::<TestBackend, Discriminator<TestBackend>>();

        let g_before = to_vec(classifier.fc2.weight.val());
        let d_before = to_vec(discriminator.fc1.weight.val());

        let batch = DigitBatcher::<TestBackend>::new(device.clone()).batch(synthetic_samples(8, 3));
        let (classifier, discriminator, losses) = adversarial_step(
            classifier, discriminator, &mut optim_g, &mut optim_d, batch, 1e-3,
        );

        assert!(losses.d_loss.is_finite() && losses.d_loss > 0.0);
        assert!(losses.g_loss.is_finite() && losses.g_loss > 0.0);
        assert!((0.0..=1.0).contains(&losses.d_real));
        assert_ne!(g_before, to_vec(classifier.fc2.weight.val()));
        assert_ne!(d_before, to_vec(discriminator.fc1.weight.val()));
    }

    #[test]
    fn test_run_epochs_trains_evaluates_and_checkpoints() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("dense_mnist").to_string_lossy().into_owned();
        let cfg = RunConfig {
            batch_size:    4,
            epochs:        2,
            save_interval: 2,
            save_model:    prefix,
            mode:          Mode::TrainEval,
            ..RunConfig::default()
        }
        .resolve()
        .unwrap();

        let ckpt_manager = CheckpointManager::new(&cfg.save_model).unwrap();
        let metrics = MetricsLogger::new(ckpt_manager.metrics_path()).unwrap();

        let summary = run_epochs::<TestBackend>(
            &cfg,
            Some(DigitDataset::new(synthetic_samples(10, 1))),
            Some(DigitDataset::new(synthetic_samples(6, 2))),
            &ckpt_manager,
            &metrics,
            NdArrayDevice::Cpu,
        )
        .unwrap();

        let acc = summary.last_accuracy.unwrap();
        assert_eq!(acc.total, 6);

        // epoch 1 is not a multiple of save_interval, epoch 2 is
        assert_eq!(summary.checkpoints.len(), 1);
        assert!(summary.checkpoints[0].exists());

        let csv = std::fs::read_to_string(metrics.csv_path()).unwrap();
        assert_eq!(csv.lines().count(), 3);
    }

    #[test]
    fn test_log_every_interval_and_on_last_batch() {
        let logged: Vec<usize> = (1..=23).filter(|&b| should_log(b, 23, 10)).collect();
        assert_eq!(logged, vec![10, 20, 23]);

        let every: Vec<usize> = (1..=3).filter(|&b| should_log(b, 3, 1)).collect();
        assert_eq!(every, vec![1, 2, 3]);

        assert!(should_log(5, 5, 1000));
        assert!(!should_log(4, 5, 1000));
    }

    #[test]
    fn test_train_only_run_skips_evaluation() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = RunConfig {
            batch_size: 4,
            epochs:     2,
            save_model: dir.path().join("dense_mnist").to_string_lossy().into_owned(),
            mode:       Mode::Train,
            ..RunConfig::default()
        }
        .resolve()
        .unwrap();

        let ckpt_manager = CheckpointManager::new(&cfg.save_model).unwrap();
        let metrics = MetricsLogger::new(ckpt_manager.metrics_path()).unwrap();

        let summary = run_epochs::<TestBackend>(
            &cfg,
            Some(DigitDataset::new(synthetic_samples(9, 4))),
            None,
            &ckpt_manager,
            &metrics,
            NdArrayDevice::Cpu,
        )
        .unwrap();

        assert!(summary.last_accuracy.is_none());
        assert!(summary.checkpoints.is_empty());

        let csv  = std::fs::read_to_string(metrics.csv_path()).unwrap();
        let rows: Vec<&str> = csv.lines().skip(1).collect();
        assert_eq!(rows.len(), 2);
        for (i, row) in rows.iter().enumerate() {
            assert!(row.starts_with(&format!("{},", i + 1)));
            assert!(row.ends_with(",,,"));
            assert!(!row.contains(",,,,"));
        }
    }

    #[test]
    fn test_eval_only_run_scores_loaded_classifier_without_training() {
        let dir    = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("dense_mnist").to_string_lossy().into_owned();
        let device = NdArrayDevice::Cpu;

        let ckpt_manager = CheckpointManager::new(&prefix).unwrap();
        let trained: Classifier<TestBackend> = ClassifierConfig::new().init(&device);
        let saved = ckpt_manager.save_classifier(&trained, 10).unwrap();

        let cfg = RunConfig {
            batch_size: 4,
            epochs:     5,
            load_model: Some(saved.to_string_lossy().into_owned()),
            save_model: prefix,
            mode:       Mode::Eval,
            ..RunConfig::default()
        }
        .resolve()
        .unwrap();

        let metrics = MetricsLogger::new(ckpt_manager.metrics_path()).unwrap();
        let test_samples = synthetic_samples(7, 5);

        let summary = run_epochs::<TestBackend>(
            &cfg,
            None,
            Some(DigitDataset::new(test_samples.clone())),
            &ckpt_manager,
            &metrics,
            device.clone(),
        )
        .unwrap();

        // The saved classifier, untouched, scores the test set
        let batch    = DigitBatcher::<NdArray>::new(device).batch(test_samples);
        let expected = crate::ml::evaluator::count_correct(
            trained.valid().forward(batch.images),
            batch.labels,
        );
        let acc = summary.last_accuracy.unwrap();
        assert_eq!(acc.total, 7);
        assert_eq!(acc.correct, expected);

        assert!(summary.checkpoints.is_empty());

        let csv  = std::fs::read_to_string(metrics.csv_path()).unwrap();
        let rows: Vec<&str> = csv.lines().skip(1).collect();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].starts_with("1,,,"));
        assert!(rows[0].contains(",7,"));
    }
}
