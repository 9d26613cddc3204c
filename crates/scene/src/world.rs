use crate::lights::LightRig;
use crate::model::Model;

/// Scene root: one light rig and at most one model.
#[derive(Debug, Default)]
pub struct World {
    lights: LightRig,
    model: Option<Model>,
    generation: u64,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lights(lights: LightRig) -> Self {
        Self {
            lights,
            ..Self::default()
        }
    }

    pub fn lights(&self) -> &LightRig {
        &self.lights
    }

    /// Attaches `model`, replacing any previous one wholesale. Returns the
    /// model that was detached.
    pub fn attach_model(&mut self, model: Model) -> Option<Model> {
        self.generation = self.generation.wrapping_add(1);
        self.model.replace(model)
    }

    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    pub fn model_mut(&mut self) -> Option<&mut Model> {
        self.model.as_mut()
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Bumped on every attach/detach; render backends use it to know when
    /// to re-upload geometry.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
