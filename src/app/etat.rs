// src/app/etat.rs
//
// État de l'application : l'éditeur vivant (jamais persisté, une session
// repart toujours de zéro), l'historique et les préférences d'affichage.

use serde::{Deserialize, Serialize};

use crate::noyau::Editeur;

use super::historique::Historique;

#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct AppCalc {
    #[serde(skip)]
    pub(crate) editeur: Editeur,
    pub(crate) historique: Historique,
    pub(crate) sombre: bool,
    #[serde(skip)]
    pub(crate) panneau_historique: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            editeur: Editeur::default(),
            historique: Historique::default(),
            // thème clair au premier lancement, le sombre est une
            // préférence enregistrée
            sombre: false,
            panneau_historique: false,
        }
    }
}

impl AppCalc {
    /// Commande `=` : évalue et historise en cas de succès.
    pub(crate) fn egal(&mut self) {
        if let Some(calcul) = self.editeur.egal() {
            self.historique.ajouter(calcul);
        }
    }

    /// Rappelle le résultat d'une entrée d'historique comme point de
    /// départ d'un nouveau calcul.
    pub(crate) fn rappeler(&mut self, indice: usize) {
        if let Some(entree) = self.historique.entrees().get(indice) {
            let brut = entree.resultat.clone();
            self.editeur.deposer_resultat(&brut);
        }
    }

    pub(crate) fn basculer_theme(&mut self) {
        self.sombre = !self.sombre;
    }

    pub(crate) fn basculer_panneau(&mut self) {
        self.panneau_historique = !self.panneau_historique;
    }
}
