use ndarray::ArrayD;

/// Stable identity of a parameter inside a [`Parameters`] arena.
///
/// Ids are handed out at registration and never change; update rules key
/// their accumulators on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamId(usize);

impl ParamId {
    /// Returns the arena index backing this id.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A named trainable tensor with a fixed shape.
#[derive(Debug, Clone)]
pub struct Parameter {
    id: ParamId,
    name: String,
    value: ArrayD<f32>,
}

impl Parameter {
    /// Returns this parameter's stable id.
    pub fn id(&self) -> ParamId {
        self.id
    }

    /// Returns this parameter's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns this parameter's current value.
    pub fn value(&self) -> &ArrayD<f32> {
        &self.value
    }
}

/// The arena of trainable parameters.
///
/// Registration order defines both parameter identity and the order in which
/// update rules visit parameters. The arena is append-only; values change,
/// shapes do not.
#[derive(Debug, Default)]
pub struct Parameters {
    entries: Vec<Parameter>,
}

impl Parameters {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a named tensor and returns its stable id.
    pub fn register(&mut self, name: impl Into<String>, value: ArrayD<f32>) -> ParamId {
        let id = ParamId(self.entries.len());
        self.entries.push(Parameter {
            id,
            name: name.into(),
            value,
        });

        id
    }

    /// Returns the amount of registered parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the parameter registered under `id`.
    ///
    /// # Panics
    /// If `id` does not belong to this arena.
    pub fn get(&self, id: ParamId) -> &Parameter {
        &self.entries[id.0]
    }

    /// Returns the current value of the parameter registered under `id`.
    ///
    /// # Panics
    /// If `id` does not belong to this arena.
    pub fn value(&self, id: ParamId) -> &ArrayD<f32> {
        &self.entries[id.0].value
    }

    /// Assigns a new value to the parameter registered under `id`.
    ///
    /// This is the write primitive for whichever executor applies an update
    /// plan.
    ///
    /// # Panics
    /// If `id` does not belong to this arena, or if the new value's shape
    /// differs from the registered shape.
    pub fn assign(&mut self, id: ParamId, value: ArrayD<f32>) {
        let entry = &mut self.entries[id.0];
        assert_eq!(
            entry.value.shape(),
            value.shape(),
            "parameter '{}' changed shape",
            entry.name
        );

        entry.value = value;
    }

    /// Iterates the parameters in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{arr1, arr2};

    use super::*;

    #[test]
    fn registration_order_defines_identity() {
        let mut params = Parameters::new();
        let w = params.register("w", arr2(&[[0.0_f32; 2]; 2]).into_dyn());
        let b = params.register("b", arr1(&[0.0_f32; 2]).into_dyn());

        assert_eq!(w.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(params.len(), 2);
        assert_eq!(params.get(b).name(), "b");

        let names: Vec<_> = params.iter().map(|p| p.name().to_string()).collect();
        assert_eq!(names, ["w", "b"]);
    }

    #[test]
    fn assign_replaces_the_value() {
        let mut params = Parameters::new();
        let b = params.register("b", arr1(&[0.0_f32, 0.0]).into_dyn());

        params.assign(b, arr1(&[1.0_f32, 2.0]).into_dyn());
        assert_eq!(params.value(b)[[1]], 2.0);
    }

    #[test]
    #[should_panic(expected = "changed shape")]
    fn assign_rejects_a_different_shape() {
        let mut params = Parameters::new();
        let b = params.register("b", arr1(&[0.0_f32, 0.0]).into_dyn());

        params.assign(b, arr1(&[1.0_f32]).into_dyn());
    }
}
