use crate::driver::ModelHandle;

/// Receives one call per visible instance.
pub trait DrawSink {
    fn draw(&mut self, model: ModelHandle, x: f32, z: f32);
}

impl<F> DrawSink for F
where
    F: FnMut(ModelHandle, f32, f32),
{
    fn draw(&mut self, model: ModelHandle, x: f32, z: f32) {
        self(model, x, z)
    }
}

/// Tallies draws per model.
#[derive(Debug, Default, Clone)]
pub struct CountingSink {
    per_model: Vec<u64>,
}

impl CountingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, model: ModelHandle) -> u64 {
        self.per_model.get(model.index()).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.per_model.iter().sum()
    }
}

impl DrawSink for CountingSink {
    fn draw(&mut self, model: ModelHandle, _x: f32, _z: f32) {
        let index = model.index();
        if self.per_model.len() <= index {
            self.per_model.resize(index + 1, 0);
        }
        self.per_model[index] += 1;
    }
}
