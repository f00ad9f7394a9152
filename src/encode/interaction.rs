//! Interaction log to strength matrix.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RecsimError, Result};
use crate::primitives::{Matrix, Vector};

/// Kind of user/product interaction.
///
/// # Examples
///
/// ```
/// use recsim::encode::InteractionKind;
///
/// let kind: InteractionKind = "add_to_cart".parse().expect("known label");
/// assert_eq!(kind, InteractionKind::AddToCart);
/// assert_eq!(kind.to_string(), "add_to_cart");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    /// Product page viewed.
    View,
    /// Product liked.
    Like,
    /// Product disliked.
    Dislike,
    /// Product added to a cart.
    AddToCart,
    /// Product purchased.
    Purchase,
}

impl InteractionKind {
    /// Get all interaction kinds.
    #[must_use]
    pub fn all() -> &'static [InteractionKind] {
        &[
            Self::View,
            Self::Like,
            Self::Dislike,
            Self::AddToCart,
            Self::Purchase,
        ]
    }

    /// Stable label used in logs and serialized configs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Like => "like",
            Self::Dislike => "dislike",
            Self::AddToCart => "add_to_cart",
            Self::Purchase => "purchase",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for InteractionKind {
    type Err = RecsimError;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| RecsimError::UnknownInteraction(s.to_string()))
    }
}

/// Strength assigned to each interaction kind.
///
/// Fields missing from a serialized config fall back to the defaults.
///
/// # Examples
///
/// ```
/// use recsim::encode::{InteractionKind, InteractionWeights};
///
/// let weights = InteractionWeights::default().with_weight(InteractionKind::View, 0.5);
/// assert_eq!(weights.strength(InteractionKind::View, None), 0.5);
/// // a 5-star purchase doubles the purchase weight
/// assert_eq!(weights.strength(InteractionKind::Purchase, Some(5.0)), 10.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionWeights {
    /// Weight of a view.
    pub view: f64,
    /// Weight of a like.
    pub like: f64,
    /// Weight of a dislike (negative pushes users apart).
    pub dislike: f64,
    /// Weight of an add-to-cart.
    pub add_to_cart: f64,
    /// Weight of a purchase.
    pub purchase: f64,
}

impl Default for InteractionWeights {
    fn default() -> Self {
        Self {
            view: 1.0,
            like: 3.0,
            dislike: -2.0,
            add_to_cart: 4.0,
            purchase: 5.0,
        }
    }
}

impl InteractionWeights {
    /// Create weights with the default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the weight of one interaction kind.
    #[must_use]
    pub fn with_weight(mut self, kind: InteractionKind, weight: f64) -> Self {
        *self.weight_mut(kind) = weight;
        self
    }

    /// Weight of `kind`.
    #[must_use]
    pub fn weight(&self, kind: InteractionKind) -> f64 {
        match kind {
            InteractionKind::View => self.view,
            InteractionKind::Like => self.like,
            InteractionKind::Dislike => self.dislike,
            InteractionKind::AddToCart => self.add_to_cart,
            InteractionKind::Purchase => self.purchase,
        }
    }

    fn weight_mut(&mut self, kind: InteractionKind) -> &mut f64 {
        match kind {
            InteractionKind::View => &mut self.view,
            InteractionKind::Like => &mut self.like,
            InteractionKind::Dislike => &mut self.dislike,
            InteractionKind::AddToCart => &mut self.add_to_cart,
            InteractionKind::Purchase => &mut self.purchase,
        }
    }

    /// Interaction strength: the kind's weight, scaled by `1 + rating / 5`
    /// when a nonzero rating (0..=5 stars) is attached.
    #[must_use]
    pub fn strength(&self, kind: InteractionKind, rating: Option<f64>) -> f64 {
        let weight = self.weight(kind);
        match rating {
            Some(r) if r != 0.0 => weight * (1.0 + r / 5.0),
            _ => weight,
        }
    }
}

/// Accumulates users, products and interactions into a dense matrix.
///
/// Users and products get row/column indices in registration order.
/// Recording the same (user, product) pair again overwrites the earlier
/// strength.
///
/// # Examples
///
/// ```
/// use recsim::encode::{InteractionKind, InteractionMatrixBuilder};
///
/// let mut builder = InteractionMatrixBuilder::new();
/// builder.add_users(["alice", "bob"]);
/// builder.add_products([101, 102, 103]);
/// builder.record(&"alice", &101, InteractionKind::Purchase, None);
/// builder.record(&"bob", &103, InteractionKind::Like, Some(5.0));
///
/// let interactions = builder.build();
/// assert_eq!(interactions.matrix().shape(), (2, 3));
/// assert_eq!(interactions.matrix().get(0, 0), 5.0);
/// assert_eq!(interactions.matrix().get(1, 2), 6.0);
/// ```
#[derive(Debug, Clone)]
pub struct InteractionMatrixBuilder<U, P> {
    weights: InteractionWeights,
    users: Vec<U>,
    user_index: HashMap<U, usize>,
    products: Vec<P>,
    product_index: HashMap<P, usize>,
    cells: Vec<(usize, usize, f64)>,
}

impl<U, P> Default for InteractionMatrixBuilder<U, P>
where
    U: Eq + Hash + Clone,
    P: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<U, P> InteractionMatrixBuilder<U, P>
where
    U: Eq + Hash + Clone,
    P: Eq + Hash + Clone,
{
    /// Create an empty builder using the default weights.
    #[must_use]
    pub fn new() -> Self {
        Self::with_weights(InteractionWeights::default())
    }

    /// Create an empty builder using custom weights.
    #[must_use]
    pub fn with_weights(weights: InteractionWeights) -> Self {
        Self {
            weights,
            users: Vec::new(),
            user_index: HashMap::new(),
            products: Vec::new(),
            product_index: HashMap::new(),
            cells: Vec::new(),
        }
    }

    /// Weights used to score interactions.
    #[must_use]
    pub fn weights(&self) -> &InteractionWeights {
        &self.weights
    }

    /// Register a user, returning its row index. Idempotent.
    pub fn add_user(&mut self, user: U) -> usize {
        register(&mut self.users, &mut self.user_index, user)
    }

    /// Register a product, returning its column index. Idempotent.
    pub fn add_product(&mut self, product: P) -> usize {
        register(&mut self.products, &mut self.product_index, product)
    }

    /// Register several users in order.
    pub fn add_users<I: IntoIterator<Item = U>>(&mut self, users: I) {
        for user in users {
            self.add_user(user);
        }
    }

    /// Register several products in order.
    pub fn add_products<I: IntoIterator<Item = P>>(&mut self, products: I) {
        for product in products {
            self.add_product(product);
        }
    }

    /// Record one interaction.
    ///
    /// Returns `false` and records nothing if the user or product was never
    /// registered.
    pub fn record(
        &mut self,
        user: &U,
        product: &P,
        kind: InteractionKind,
        rating: Option<f64>,
    ) -> bool {
        let (Some(&row), Some(&col)) = (self.user_index.get(user), self.product_index.get(product))
        else {
            debug!(%kind, "interaction for unregistered user or product ignored");
            return false;
        };
        let strength = self.weights.strength(kind, rating);
        self.cells.push((row, col, strength));
        true
    }

    /// Assemble the dense users x products matrix.
    #[must_use]
    pub fn build(self) -> InteractionMatrix<U, P> {
        let mut matrix = Matrix::zeros(self.users.len(), self.products.len());
        for &(row, col, strength) in &self.cells {
            matrix.set(row, col, strength);
        }
        debug!(
            users = self.users.len(),
            products = self.products.len(),
            interactions = self.cells.len(),
            "built interaction matrix"
        );
        InteractionMatrix {
            matrix,
            users: self.users,
            user_index: self.user_index,
            products: self.products,
            product_index: self.product_index,
        }
    }
}

fn register<K: Eq + Hash + Clone>(keys: &mut Vec<K>, index: &mut HashMap<K, usize>, key: K) -> usize {
    if let Some(&idx) = index.get(&key) {
        return idx;
    }
    let idx = keys.len();
    index.insert(key.clone(), idx);
    keys.push(key);
    idx
}

/// Dense users x products strength matrix with key lookups.
#[derive(Debug, Clone)]
pub struct InteractionMatrix<U, P> {
    matrix: Matrix<f64>,
    users: Vec<U>,
    user_index: HashMap<U, usize>,
    products: Vec<P>,
    product_index: HashMap<P, usize>,
}

impl<U, P> InteractionMatrix<U, P>
where
    U: Eq + Hash,
    P: Eq + Hash,
{
    /// The strength matrix (rows = users, columns = products).
    #[must_use]
    pub fn matrix(&self) -> &Matrix<f64> {
        &self.matrix
    }

    /// Users in row order.
    #[must_use]
    pub fn users(&self) -> &[U] {
        &self.users
    }

    /// Products in column order.
    #[must_use]
    pub fn products(&self) -> &[P] {
        &self.products
    }

    /// Row index of `user`.
    #[must_use]
    pub fn user_index(&self, user: &U) -> Option<usize> {
        self.user_index.get(user).copied()
    }

    /// Column index of `product`.
    #[must_use]
    pub fn product_index(&self, product: &P) -> Option<usize> {
        self.product_index.get(product).copied()
    }

    /// Copy of `user`'s interaction row.
    #[must_use]
    pub fn user_row(&self, user: &U) -> Option<Vector<f64>> {
        self.user_index(user).map(|row| self.matrix.row(row))
    }

    /// Consume, keeping only the matrix.
    #[must_use]
    pub fn into_matrix(self) -> Matrix<f64> {
        self.matrix
    }
}

#[cfg(test)]
#[path = "interaction_tests.rs"]
mod tests;
