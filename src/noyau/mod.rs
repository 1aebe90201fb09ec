// src/noyau/mod.rs
//
// Noyau pur de la calculatrice : la suite de jetons, le moteur d'édition,
// la chaîne préparation -> validation -> évaluation -> mise en forme.
// Aucune dépendance d'interface ici, tout est testable en isolation.

pub mod editeur;
pub mod erreur;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod rpn;

#[cfg(test)]
mod tests_scenarios;

pub use editeur::{Calcul, Editeur};
pub use erreur::ErreurCalcul;
