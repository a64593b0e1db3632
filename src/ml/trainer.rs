// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Runs a fixed number of epochs. Each epoch is two phases that
// never overlap:
//
//   Train  — batches from a loader that reshuffles the whole
//            training set on every pass; forward (dropout on)
//            → cross-entropy → backward → optimizer step on
//            the trainable parameters
//   Dev    — batches in dataset order on `model.valid()`
//            (inner backend, no autodiff); forward with dropout
//            off; no update
//
// Loader workers only encode ahead; tensors are built here, on
// the training thread, in the order the loader yields.
//
// After each phase the mean batch loss and the accuracy over
// all samples are computed, and both phases are appended to the
// TrainingHistory that is returned with the trained model.
//
// Burn notes:
//   - B is an AutodiffBackend; model.valid() gives TextCnn<B::InnerBackend>
//   - dev batches are therefore built on B::InnerBackend
//   - argmax(1) returns [batch, 1], flattened to [batch] in the model
//
// Reference: Burn Book §5 (Training)

use burn::{
    data::dataloader::batcher::Batcher,
    module::AutodiffModule,
    optim::{
        AdaGradConfig, AdamConfig, AdamWConfig, GradientsParams, Optimizer, RmsPropConfig,
        SgdConfig,
    },
    prelude::*,
    tensor::backend::AutodiffBackend,
};
use indicatif::{ProgressBar, ProgressStyle};

use crate::application::train_use_case::TrainConfig;
use crate::data::{
    batcher::ReviewBatcher,
    dataset::ReviewDataset,
    embeddings::EmbeddingTable,
    loader::{BatchOrder, ReviewLoader},
};
use crate::infra::metrics::{EpochMetrics, PhaseAccumulator, TrainingHistory};
use crate::ml::{
    model::{ForwardMode, TextCnn, TextCnnConfig},
    optimizer::OptimizerKind,
};

/// The trained model together with its learning curves.
pub struct TrainOutcome<B: AutodiffBackend> {
    pub model:   TextCnn<B>,
    pub history: TrainingHistory,
}

/// Epoch count, learning rate and progress display for `fit`.
struct Schedule {
    epochs:   usize,
    lr:       f64,
    progress: bool,
}

impl Schedule {
    fn progress_bar(&self, label: &'static str, batches: usize) -> ProgressBar {
        if !self.progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(batches as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg:>5} [{elapsed_precise}] {bar:40} {pos}/{len} batches")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb.set_message(label);
        pb
    }
}

/// Build the model from the embedding table, then train and evaluate it.
pub fn run_training<B: AutodiffBackend>(
    cfg:           &TrainConfig,
    table:         &EmbeddingTable,
    train_dataset: ReviewDataset,
    dev_dataset:   ReviewDataset,
    device:        &B::Device,
) -> TrainOutcome<B> {
    B::seed(cfg.seed);

    let model_cfg = TextCnnConfig::for_table(table, cfg.hidden_size, cfg.kernel_size)
        .with_dropout(cfg.dropout);
    let model: TextCnn<B> = model_cfg.init(table, device);

    let frozen = table.values().len();
    tracing::info!(
        "Model ready: {} parameters ({} trainable, {} frozen embedding), hidden={}, kernel={}",
        model.num_params(),
        model.num_params() - frozen,
        frozen,
        cfg.hidden_size,
        cfg.kernel_size,
    );

    train_and_evaluate(model, cfg, train_dataset, dev_dataset, device)
}

/// Train an existing model for `cfg.epochs` epochs.
///
/// The optimizer named by `cfg.optimizer` is constructed here, once,
/// and handed to the generic loop.
pub fn train_and_evaluate<B: AutodiffBackend>(
    model:         TextCnn<B>,
    cfg:           &TrainConfig,
    train_dataset: ReviewDataset,
    dev_dataset:   ReviewDataset,
    device:        &B::Device,
) -> TrainOutcome<B> {
    let schedule = Schedule {
        epochs:   cfg.epochs,
        lr:       cfg.lr,
        progress: cfg.progress,
    };

    // ── Training loader (whole set reshuffled every pass) ─────────────────────
    let mut train_loader =
        ReviewLoader::new(train_dataset, cfg.batch_size, BatchOrder::Shuffled { seed: cfg.seed })
            .with_workers(cfg.num_workers);

    // ── Dev loader (dataset order) ────────────────────────────────────────────
    let mut dev_loader = ReviewLoader::new(dev_dataset, cfg.batch_size, BatchOrder::Sequential)
        .with_workers(cfg.num_workers);

    tracing::info!(
        "Training for {} epochs with {} (lr={}, batch_size={})",
        cfg.epochs,
        cfg.optimizer,
        cfg.lr,
        cfg.batch_size,
    );

    match cfg.optimizer {
        OptimizerKind::Sgd => {
            let optim = SgdConfig::new().init::<B, TextCnn<B>>();
            fit(model, optim, &mut train_loader, &mut dev_loader, device, &schedule)
        }
        OptimizerKind::Adam => {
            let optim = AdamConfig::new().init::<B, TextCnn<B>>();
            fit(model, optim, &mut train_loader, &mut dev_loader, device, &schedule)
        }
        OptimizerKind::AdamW => {
            let optim = AdamWConfig::new().init::<B, TextCnn<B>>();
            fit(model, optim, &mut train_loader, &mut dev_loader, device, &schedule)
        }
        OptimizerKind::AdaGrad => {
            let optim = AdaGradConfig::new().init::<B, TextCnn<B>>();
            fit(model, optim, &mut train_loader, &mut dev_loader, device, &schedule)
        }
        OptimizerKind::RmsProp => {
            let optim = RmsPropConfig::new().init::<B, TextCnn<B>>();
            fit(model, optim, &mut train_loader, &mut dev_loader, device, &schedule)
        }
    }
}

fn fit<B, O>(
    mut model:    TextCnn<B>,
    mut optim:    O,
    train_loader: &mut ReviewLoader,
    dev_loader:   &mut ReviewLoader,
    device:       &B::Device,
    schedule:     &Schedule,
) -> TrainOutcome<B>
where
    B: AutodiffBackend,
    O: Optimizer<TextCnn<B>, B>,
{
    let train_batcher = ReviewBatcher::<B>::new(device.clone());
    let dev_batcher   = ReviewBatcher::<B::InnerBackend>::new(device.clone());
    let mut history   = TrainingHistory::new();

    for epoch in 1..=schedule.epochs {
        // ── Train phase ───────────────────────────────────────────────────────
        let mut train = PhaseAccumulator::new();
        let pb = schedule.progress_bar("Train", train_loader.num_batches());

        for items in train_loader.pass() {
            let batch   = train_batcher.batch(items);
            let targets = batch.targets.clone();
            let (loss, output) = model.forward_loss(batch, ForwardMode::Train);

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            train.record(loss_val, &classes(output.predictions), &classes(targets));

            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(schedule.lr, model, grads);
            pb.inc(1);
        }
        pb.finish_and_clear();
        let train_metrics = train.finish();

        // ── Eval phase ────────────────────────────────────────────────────────
        let dev_metrics = evaluate(&model.valid(), dev_loader, &dev_batcher, schedule).finish();

        let metrics = EpochMetrics::new(epoch, train_metrics, dev_metrics);
        report(&metrics, schedule.epochs);
        history.push(&metrics);
    }

    TrainOutcome { model, history }
}

/// One read-only pass over the dev loader. The caller finishes
/// the returned accumulator into the phase metrics.
fn evaluate<B: Backend>(
    model:    &TextCnn<B>,
    loader:   &mut ReviewLoader,
    batcher:  &ReviewBatcher<B>,
    schedule: &Schedule,
) -> PhaseAccumulator {
    let mut dev = PhaseAccumulator::new();
    let pb = schedule.progress_bar("Dev", loader.num_batches());

    for items in loader.pass() {
        let batch   = batcher.batch(items);
        let targets = batch.targets.clone();
        let (loss, output) = model.forward_loss(batch, ForwardMode::Eval);
        let loss_val: f64 = loss.into_scalar().elem::<f64>();
        dev.record(loss_val, &classes(output.predictions), &classes(targets));
        pb.inc(1);
    }
    pb.finish_and_clear();
    dev
}

fn classes<B: Backend>(t: Tensor<B, 1, Int>) -> Vec<i64> {
    t.into_data().iter::<i64>().collect()
}

fn report(m: &EpochMetrics, epochs: usize) {
    println!(
        "Epoch {:>3}/{} | train_loss={:.4} train_acc={:.4} | dev_loss={:.4} dev_acc={:.4}",
        m.epoch, epochs, m.train.loss, m.train.accuracy, m.dev.loss, m.dev.accuracy,
    );
    tracing::info!(
        "Epoch {} Train={:.4} Dev={:.4}",
        m.epoch,
        m.train.accuracy,
        m.dev.accuracy
    );
}
