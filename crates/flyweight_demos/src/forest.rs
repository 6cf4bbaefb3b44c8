//! # Forest
//!
//! Trees share their species data through [`TreeType`] flyweights. A
//! [`Tree`] only stores its position plus a handle to its species, so a
//! forest of a million trees holds a handful of `TreeType`s.

use std::sync::Arc;

use flyweight_core::{
    Flyweight, FlyweightError, FlyweightKey, FlyweightPool, FlyweightResult, IntrinsicState,
    Operation,
};

/// Position of a tree on the map (extrinsic state).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: i64,
    /// Vertical coordinate.
    pub y: i64,
}

impl Position {
    /// Creates a position.
    #[inline]
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Species data shared by every tree of the same kind (intrinsic state).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeType {
    name: String,
    color: String,
    texture: String,
}

impl TreeType {
    /// Creates a tree type.
    ///
    /// # Errors
    ///
    /// Returns [`FlyweightError::InvalidIntrinsicState`] if any attribute is
    /// blank.
    pub fn new(
        name: impl Into<String>,
        color: impl Into<String>,
        texture: impl Into<String>,
    ) -> FlyweightResult<Self> {
        let tree_type = Self {
            name: name.into(),
            color: color.into(),
            texture: texture.into(),
        };

        for (attribute, value) in tree_type.attributes() {
            if value.trim().is_empty() {
                return Err(FlyweightError::invalid_state(format!(
                    "tree {attribute} is blank"
                )));
            }
        }

        Ok(tree_type)
    }

    /// Species name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Foliage color.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Bark texture.
    #[must_use]
    pub fn texture(&self) -> &str {
        &self.texture
    }

    fn attributes(&self) -> [(&str, &str); 3] {
        [
            ("name", self.name.as_str()),
            ("color", self.color.as_str()),
            ("texture", self.texture.as_str()),
        ]
    }
}

impl IntrinsicState for TreeType {
    fn canonical_key(&self) -> FlyweightKey {
        FlyweightKey::from_named(self.attributes())
    }
}

impl Operation<Position> for TreeType {
    type Output = String;

    fn operation(&self, at: &Position) -> String {
        format!(
            "Draw {} tree (color: {}, texture: {}) at ({}, {})",
            self.name, self.color, self.texture, at.x, at.y
        )
    }
}

/// Drawing surface for trees.
pub trait Canvas {
    /// Draws one rendered tree.
    fn draw(&mut self, command: &str);
}

/// Canvas that records every draw command as a line of text.
#[derive(Debug, Default)]
pub struct TextCanvas {
    lines: Vec<String>,
}

impl TextCanvas {
    /// Creates an empty canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines drawn so far.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Canvas for TextCanvas {
    fn draw(&mut self, command: &str) {
        self.lines.push(command.to_owned());
    }
}

/// One planted tree: its position plus a shared species handle.
#[derive(Clone, Debug)]
pub struct Tree {
    position: Position,
    tree_type: Arc<Flyweight<TreeType>>,
}

impl Tree {
    /// Where the tree stands.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// The shared species flyweight.
    #[must_use]
    pub fn tree_type(&self) -> &Arc<Flyweight<TreeType>> {
        &self.tree_type
    }

    /// Draws this tree by handing its position to the shared species.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.draw(&self.tree_type.operation(&self.position));
    }
}

/// A collection of trees backed by its own tree-type pool.
#[derive(Debug, Default)]
pub struct Forest {
    tree_types: FlyweightPool<TreeType>,
    trees: Vec<Tree>,
}

impl Forest {
    /// Creates an empty forest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Plants a tree, reusing the species flyweight when it already exists.
    ///
    /// # Errors
    ///
    /// Returns [`FlyweightError::InvalidIntrinsicState`] if a species
    /// attribute is blank. Nothing is planted in that case.
    pub fn plant_tree(
        &mut self,
        x: i64,
        y: i64,
        name: &str,
        color: &str,
        texture: &str,
    ) -> FlyweightResult<&Tree> {
        let tree_type = TreeType::new(name, color, texture)?;
        Ok(self.plant(Position::new(x, y), tree_type))
    }

    /// Plants a tree of an already validated species.
    pub fn plant(&mut self, position: Position, tree_type: TreeType) -> &Tree {
        let tree_type = self.tree_types.get_or_create(tree_type);
        self.trees.push(Tree {
            position,
            tree_type,
        });
        &self.trees[self.trees.len() - 1]
    }

    /// Draws every tree in planting order.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        tracing::info!(
            trees = self.trees.len(),
            species = self.tree_types.len(),
            "drawing forest"
        );
        for tree in &self.trees {
            tree.draw(canvas);
        }
    }

    /// All planted trees.
    #[must_use]
    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    /// The species pool.
    #[must_use]
    pub fn tree_types(&self) -> &FlyweightPool<TreeType> {
        &self.tree_types
    }
}
