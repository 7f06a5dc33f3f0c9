use crate::scene::clock::Clock;
use crate::scene::entity::Entity;
use crate::scene::factory::EntityFactory;
use crate::scene::palette::Palette;

/// A named entity collection, drawn in the order layers were installed.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub name: String,
    pub entities: Vec<Entity>,
}

impl Layer {
    pub fn new(name: impl Into<String>, entities: Vec<Entity>) -> Self {
        Self {
            name: name.into(),
            entities,
        }
    }
}

/// Single owner of the clock, the palette and every entity collection of a running sketch.
#[derive(Clone, Debug)]
pub struct SceneState {
    pub clock: Clock,
    palette: Palette,
    layers: Vec<Layer>,
    seed: u64,
    generation: u64,
}

impl SceneState {
    pub fn new(clock: Clock, palette: Palette, seed: u64) -> Self {
        Self {
            clock,
            palette,
            layers: Vec::new(),
            seed,
            generation: 0,
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Replace every layer wholesale.
    pub fn install_layers(&mut self, layers: Vec<Layer>) {
        self.layers = layers;
    }

    pub fn entity_count(&self) -> usize {
        self.layers.iter().map(|l| l.entities.len()).sum()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Factory for the current generation. Generation 0 is seeded with `seed` itself.
    pub fn factory(&self) -> EntityFactory {
        EntityFactory::new(
            self.seed
                .wrapping_add(self.generation.wrapping_mul(0x9E37_79B9_7F4A_7C15)),
        )
    }

    /// Move to the next population generation (click/keypress regeneration).
    pub fn next_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}
