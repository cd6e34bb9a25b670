use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;

use caret::{CaretLocator, MeasurementBackend};
use input_core::{FieldId, FieldKind};
use rand::SeedableRng;
use rand::rngs::StdRng;
use words::WordCache;

use crate::controller::{AutocompleteController, ScaleProvider};
use crate::settings::SharedSettings;

/// One controller per multi-line field, sharing a locator, the word cache
/// and the settings.
pub struct FieldRegistry<B: MeasurementBackend> {
    locator: Rc<CaretLocator<B>>,
    words: Arc<WordCache>,
    settings: SharedSettings,
    scale: ScaleProvider,
    /// Fixed seed for random picks; each field derives its own stream.
    seed: Option<u64>,
    controllers: BTreeMap<FieldId, AutocompleteController<B>>,
}

impl<B: MeasurementBackend> FieldRegistry<B> {
    pub fn new(locator: CaretLocator<B>, words: Arc<WordCache>, settings: SharedSettings) -> Self {
        Self {
            locator: Rc::new(locator),
            words,
            settings,
            scale: Rc::new(|| 1.0),
            seed: None,
            controllers: BTreeMap::new(),
        }
    }

    pub fn with_scale(mut self, scale: ScaleProvider) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn settings(&self) -> &SharedSettings {
        &self.settings
    }

    pub fn words(&self) -> &Arc<WordCache> {
        &self.words
    }

    /// Attach a controller to a newly seen field. Only multi-line fields get
    /// one; attaching twice keeps the existing controller. Returns whether
    /// the field has a controller afterwards.
    pub fn attach(&mut self, id: FieldId, kind: FieldKind) -> bool {
        if kind != FieldKind::MultiLine {
            return false;
        }
        if self.controllers.contains_key(&id) {
            return true;
        }

        let mut controller =
            AutocompleteController::new(Rc::clone(&self.locator), Arc::clone(&self.words), self.settings.clone())
                .with_scale(Rc::clone(&self.scale));
        if let Some(seed) = self.seed {
            controller = controller.with_rng(StdRng::seed_from_u64(seed ^ id.as_raw()));
        }
        log::debug!(target: "autocomplete", "attached to field {id}");
        self.controllers.insert(id, controller);
        true
    }

    pub fn detach(&mut self, id: FieldId) -> Option<AutocompleteController<B>> {
        self.controllers.remove(&id)
    }

    pub fn get(&self, id: FieldId) -> Option<&AutocompleteController<B>> {
        self.controllers.get(&id)
    }

    pub fn get_mut(&mut self, id: FieldId) -> Option<&mut AutocompleteController<B>> {
        self.controllers.get_mut(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.controllers.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}
