// src/noyau/editeur.rs
//
// Moteur d'édition : chaque commande mute la suite de jetons sous les
// invariants de bonne formation (jamais deux opérateurs adjacents, balance
// des parenthèses jamais négative, multiplication implicite), puis
// recalcule la chaîne d'affichage.
//
// Contrats :
// - La suite n'est jamais vide après une commande (repli sur [0]).
// - `balance` == parenthèses ouvrantes moins fermantes de la suite vivante.
// - Après un `=` réussi OU en erreur, `resultat_affiche` est vrai : la
//   prochaine saisie repart d'une expression neuve.

use super::eval::{evaluer, preparer, valider};
use super::format::{affichage_jetons, format_resultat};
use super::jetons::{compte_chiffres, en_expression, Jeton, Op, Sens, MAX_CHIFFRES};

/// Calcul abouti, prêt à être historisé (l'horodatage est posé par la
/// couche application, le noyau ne lit pas l'horloge).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Calcul {
    pub expression: String,
    pub resultat: String,
}

#[derive(Clone, Debug)]
pub struct Editeur {
    jetons: Vec<Jeton>,
    balance: u32,
    resultat_affiche: bool,
    affichage: String,
}

impl Default for Editeur {
    fn default() -> Self {
        Self {
            jetons: vec![Jeton::zero()],
            balance: 0,
            resultat_affiche: false,
            affichage: "0".to_string(),
        }
    }
}

impl Editeur {
    /* ------------------------ Lecture ------------------------ */

    pub fn affichage(&self) -> &str {
        &self.affichage
    }

    pub fn jetons(&self) -> &[Jeton] {
        &self.jetons
    }

    pub fn balance(&self) -> u32 {
        self.balance
    }

    pub fn resultat_affiche(&self) -> bool {
        self.resultat_affiche
    }

    /// Indice du nombre le plus proche en partant de la fin, sans jamais
    /// traverser une parenthèse fermante (signe/pourcentage ne doivent pas
    /// atteindre un nombre à l'intérieur d'un groupe déjà fermé).
    fn indice_dernier_nombre(&self) -> Option<usize> {
        for (i, jeton) in self.jetons.iter().enumerate().rev() {
            match jeton {
                Jeton::Nombre(_) => return Some(i),
                Jeton::Parenthese(Sens::Fermante) => return None,
                _ => {}
            }
        }
        None
    }

    fn rafraichir(&mut self) {
        self.affichage = affichage_jetons(&self.jetons);
    }

    /* ------------------------ Commandes ------------------------ */

    pub fn chiffre(&mut self, chiffre: char) {
        if !chiffre.is_ascii_digit() {
            return;
        }

        if self.resultat_affiche {
            self.jetons = vec![Jeton::nombre(&chiffre.to_string())];
            self.resultat_affiche = false;
            self.rafraichir();
            return;
        }

        if let Some(Jeton::Nombre(brut)) = self.jetons.last_mut() {
            if compte_chiffres(brut) >= MAX_CHIFFRES {
                // plafond atteint : le chiffre est ignoré en silence
                return;
            }
            if brut.as_str() == "0" {
                *brut = chiffre.to_string();
            } else {
                brut.push(chiffre);
            }
        } else {
            if matches!(self.jetons.last(), Some(Jeton::Parenthese(Sens::Fermante))) {
                self.jetons.push(Jeton::Operateur(Op::Fois));
            }
            self.jetons.push(Jeton::nombre(&chiffre.to_string()));
        }

        self.rafraichir();
    }

    pub fn decimale(&mut self) {
        if self.resultat_affiche {
            self.jetons = vec![Jeton::nombre("0.")];
            self.resultat_affiche = false;
            self.rafraichir();
            return;
        }

        if let Some(Jeton::Nombre(brut)) = self.jetons.last_mut() {
            if !brut.contains('.') {
                brut.push('.');
            }
        } else {
            if matches!(self.jetons.last(), Some(Jeton::Parenthese(Sens::Fermante))) {
                self.jetons.push(Jeton::Operateur(Op::Fois));
            }
            self.jetons.push(Jeton::nombre("0."));
        }

        self.rafraichir();
    }

    pub fn operateur(&mut self, op: Op) {
        // le résultat affiché devient l'opérande gauche
        self.resultat_affiche = false;

        if self.jetons.is_empty() {
            self.jetons.push(Jeton::zero());
        }

        if let Some(Jeton::Operateur(dernier)) = self.jetons.last_mut() {
            // pas d'empilement d'opérateurs : le plus récent gagne
            *dernier = op;
        } else if matches!(
            self.jetons.last(),
            None | Some(Jeton::Parenthese(Sens::Ouvrante))
        ) {
            self.jetons.push(Jeton::zero());
            self.jetons.push(Jeton::Operateur(op));
        } else {
            self.jetons.push(Jeton::Operateur(op));
        }

        self.rafraichir();
    }

    pub fn signe(&mut self) {
        let Some(i) = self.indice_dernier_nombre() else {
            return;
        };
        if let Jeton::Nombre(brut) = &mut self.jetons[i] {
            if brut.starts_with('-') {
                brut.remove(0);
            } else if brut.as_str() != "0" {
                // pas de zéro négatif
                brut.insert(0, '-');
            }
        }
        self.resultat_affiche = false;
        self.rafraichir();
    }

    /// Remplace le dernier nombre par sa valeur divisée par 100, via la
    /// conversion f64 -> texte par défaut (PAS la mise en forme plafonnée :
    /// un pourcentage peut porter plus de 15 chiffres jusqu'au prochain `=`).
    pub fn pourcentage(&mut self) {
        let Some(i) = self.indice_dernier_nombre() else {
            return;
        };
        if let Jeton::Nombre(brut) = &mut self.jetons[i] {
            if let Ok(valeur) = brut.parse::<f64>() {
                *brut = (valeur / 100.0).to_string();
                self.resultat_affiche = false;
                self.rafraichir();
            }
        }
    }

    /// Bouton unique `( )` : ferme si la balance le permet et qu'une valeur
    /// précède, sinon ouvre (avec multiplication implicite après une valeur).
    pub fn bascule_parentheses(&mut self) {
        if self.resultat_affiche {
            self.resultat_affiche = false;
            self.jetons = vec![Jeton::zero()];
        }

        let peut_fermer = self.balance > 0
            && self.jetons.last().is_some_and(|j| j.est_valeur());

        if peut_fermer {
            self.jetons.push(Jeton::Parenthese(Sens::Fermante));
            self.balance = self.balance.saturating_sub(1);
        } else {
            if self.est_graine_zero() {
                self.jetons.clear();
            } else if self.jetons.last().is_some_and(|j| j.est_valeur()) {
                self.jetons.push(Jeton::Operateur(Op::Fois));
            }
            self.jetons.push(Jeton::Parenthese(Sens::Ouvrante));
            self.balance += 1;
        }

        self.rafraichir();
    }

    /// Variante clavier `(` : même règle d'ouverture que la bascule.
    pub fn ouvrir_parenthese(&mut self) {
        if self.resultat_affiche {
            self.resultat_affiche = false;
            self.jetons = vec![Jeton::zero()];
            self.balance = 0;
        }

        if self.est_graine_zero() {
            self.jetons.clear();
        } else if self.jetons.last().is_some_and(|j| j.est_valeur()) {
            self.jetons.push(Jeton::Operateur(Op::Fois));
        }
        self.jetons.push(Jeton::Parenthese(Sens::Ouvrante));
        self.balance += 1;

        self.rafraichir();
    }

    /// Variante clavier `)` : plus stricte que la bascule, la frappe est
    /// ignorée entièrement si rien ne peut être fermé (pas de repli vers
    /// une ouverture).
    pub fn fermer_parenthese(&mut self) {
        if self.resultat_affiche {
            self.resultat_affiche = false;
            self.jetons = vec![Jeton::zero()];
            self.balance = 0;
        }

        if self.balance > 0 && self.jetons.last().is_some_and(|j| j.est_valeur()) {
            self.jetons.push(Jeton::Parenthese(Sens::Fermante));
            self.balance = self.balance.saturating_sub(1);
        }

        self.rafraichir();
    }

    pub fn retour_arriere(&mut self) {
        if self.resultat_affiche {
            self.effacer();
            return;
        }

        let Some(dernier) = self.jetons.last().cloned() else {
            self.effacer();
            return;
        };

        match dernier {
            Jeton::Nombre(brut) if brut.len() > 1 => {
                if let Some(Jeton::Nombre(b)) = self.jetons.last_mut() {
                    b.pop();
                }
            }
            Jeton::Nombre(_) | Jeton::Operateur(_) => {
                self.jetons.pop();
            }
            Jeton::Parenthese(sens) => {
                self.jetons.pop();
                match sens {
                    Sens::Ouvrante => self.balance = self.balance.saturating_sub(1),
                    Sens::Fermante => self.balance += 1,
                }
            }
        }

        if self.jetons.is_empty() {
            self.jetons.push(Jeton::zero());
        }
        self.rafraichir();
    }

    pub fn effacer(&mut self) {
        *self = Editeur::default();
    }

    /// Dépose un résultat finalisé (rappel d'historique ou fin de `=`).
    pub fn deposer_resultat(&mut self, brut: &str) {
        self.jetons = vec![Jeton::nombre(brut)];
        self.balance = 0;
        self.resultat_affiche = true;
        self.rafraichir();
    }

    /* ------------------------ Évaluation ------------------------ */

    /// Commande `=` : répare, sérialise, valide, délègue à l'évaluateur,
    /// met en forme.
    ///
    /// - copie réparée vide : no-op silencieux (pas d'erreur, affichage
    ///   inchangé, pas d'entrée d'historique)
    /// - succès : la suite vivante devient le seul nombre résultat, et le
    ///   calcul (expression affichée de la copie réparée + résultat) est
    ///   rendu pour l'historique
    /// - échec : affichage littéral `"Error"`, état remis à neuf
    pub fn egal(&mut self) -> Option<Calcul> {
        let prepares = preparer(&self.jetons);
        if prepares.is_empty() {
            return None;
        }

        let expression = en_expression(&prepares);
        let calcul = valider(&expression)
            .and_then(|_| evaluer(&expression))
            .and_then(format_resultat);

        match calcul {
            Ok(resultat) => {
                let expression_affichee = affichage_jetons(&prepares);
                self.deposer_resultat(&resultat);
                Some(Calcul {
                    expression: expression_affichee,
                    resultat,
                })
            }
            Err(_erreur) => {
                self.jetons = vec![Jeton::zero()];
                self.balance = 0;
                self.resultat_affiche = true;
                self.affichage = "Error".to_string();
                None
            }
        }
    }

    /* ------------------------ Interne ------------------------ */

    /// Vrai si la suite est exactement la graine initiale `[0]`.
    fn est_graine_zero(&self) -> bool {
        matches!(self.jetons.as_slice(), [Jeton::Nombre(brut)] if brut.as_str() == "0")
    }
}
