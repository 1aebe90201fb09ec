// src/app/historique.rs
//
// Historique des calculs : au plus 50 entrées, la plus récente en tête.
// Sérialisé tel quel dans le stockage de l'application pour survivre aux
// redémarrages.

use serde::{Deserialize, Serialize};

use crate::noyau::Calcul;

pub const MAX_ENTREES: usize = 50;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntreeHistorique {
    pub expression: String,
    pub resultat: String,
    /// Horodatage RFC 3339 (UTC) du moment du calcul.
    pub horodatage: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Historique {
    entrees: Vec<EntreeHistorique>,
}

impl Historique {
    pub fn entrees(&self) -> &[EntreeHistorique] {
        &self.entrees
    }

    pub fn est_vide(&self) -> bool {
        self.entrees.is_empty()
    }

    pub fn ajouter(&mut self, calcul: Calcul) {
        self.entrees.insert(
            0,
            EntreeHistorique {
                expression: calcul.expression,
                resultat: calcul.resultat,
                horodatage: chrono::Utc::now().to_rfc3339(),
            },
        );
        self.entrees.truncate(MAX_ENTREES);
    }

    pub fn supprimer(&mut self, indice: usize) {
        if indice < self.entrees.len() {
            self.entrees.remove(indice);
        }
    }

    pub fn vider(&mut self) {
        self.entrees.clear();
    }
}
