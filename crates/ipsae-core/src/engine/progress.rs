/// Events emitted while a complex is loaded and scored.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    StageStart { name: &'static str },
    StageFinish,

    /// The pairwise scan is about to visit `residues` rows.
    ScanStart { residues: u64 },
    /// One row of the pairwise scan has been evaluated.
    ResidueScanned,
    ScanFinish,
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Optional sink for [`Progress`] events; a reporter without a callback discards them.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Runs `stage` between a [`Progress::StageStart`] and a [`Progress::StageFinish`].
    ///
    /// The finish event is only sent when `stage` returns `Ok`.
    pub fn stage<T, E>(
        &self,
        name: &'static str,
        stage: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        self.report(Progress::StageStart { name });
        let value = stage()?;
        self.report(Progress::StageFinish);
        Ok(value)
    }
}
