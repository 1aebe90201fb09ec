// src/noyau/erreur.rs

use thiserror::Error;

/// Erreurs du pipeline d'évaluation.
///
/// Toutes sont traitées à l'identique à la frontière du pipeline :
/// affichage littéral `"Error"` + remise à l'état initial éditable.
/// Aucune n'est propagée au-delà de la surface de commandes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ErreurCalcul {
    /// Caractère étranger détecté avant délégation, ou chaîne que
    /// l'évaluateur arithmétique ne sait pas lire.
    #[error("expression invalide")]
    ExpressionInvalide,

    /// L'évaluateur a produit une valeur non finie (NaN, ±inf).
    #[error("résultat non fini")]
    ResultatInvalide,

    /// Magnitude ou nombre de chiffres au-delà du plafond de 15 chiffres.
    #[error("dépassement de capacité")]
    Depassement,
}
