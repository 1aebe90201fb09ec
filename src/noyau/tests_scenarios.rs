// src/noyau/tests_scenarios.rs
//
// Campagne transverse : scénarios bout en bout sur l'éditeur complet,
// puis martelage pseudo-aléatoire (graines fixes, exécution déterministe)
// pour les invariants qui doivent tenir sous n'importe quelle saisie.

use std::time::{Duration, Instant};

use super::editeur::Editeur;
use super::eval::preparer;
use super::jetons::{Jeton, Op, Sens};

/* ---- générateur déterministe (LCG), sans dépendance externe ---- */

struct Rng(u64);

impl Rng {
    fn new(graine: u64) -> Self {
        Rng(graine.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407))
    }

    fn suivant(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn borne(&mut self, n: u64) -> u64 {
        self.suivant() % n
    }
}

/// Garde-fou anti-gel : vrai tant que la campagne reste dans son budget.
fn budget(depart: Instant, max: Duration) -> bool {
    depart.elapsed() < max
}

fn commande_aleatoire(rng: &mut Rng, editeur: &mut Editeur) {
    match rng.borne(15) {
        0..=3 => editeur.chiffre(char::from(b'0' + rng.borne(10) as u8)),
        4 => editeur.decimale(),
        5 => editeur.operateur(Op::Plus),
        6 => editeur.operateur(Op::Moins),
        7 => editeur.operateur(Op::Fois),
        8 => editeur.operateur(Op::Division),
        9 => editeur.bascule_parentheses(),
        10 => editeur.signe(),
        11 => editeur.pourcentage(),
        12 => editeur.ouvrir_parenthese(),
        13 => editeur.fermer_parenthese(),
        _ => editeur.retour_arriere(),
    }
}

fn balance_reelle(jetons: &[Jeton]) -> i64 {
    jetons.iter().fold(0i64, |acc, j| match j {
        Jeton::Parenthese(Sens::Ouvrante) => acc + 1,
        Jeton::Parenthese(Sens::Fermante) => acc - 1,
        _ => acc,
    })
}

/* ---- scénarios bout en bout ---- */

#[test]
fn scenario_complet_avec_parentheses() {
    let mut editeur = Editeur::default();
    editeur.bascule_parentheses();
    editeur.chiffre('8');
    editeur.operateur(Op::Moins);
    editeur.chiffre('3');
    editeur.bascule_parentheses();
    editeur.operateur(Op::Fois);
    editeur.chiffre('4');
    assert_eq!(editeur.affichage(), "(8 − 3) × 4");

    let calcul = editeur.egal().expect("calcul attendu");
    assert_eq!(calcul.resultat, "20");
}

#[test]
fn scenario_pourcentage_dans_une_somme() {
    // 200 + 10% de rien d'autre que lui-même : 200 + 0.1 = 200.1
    let mut editeur = Editeur::default();
    for c in "200".chars() {
        editeur.chiffre(c);
    }
    editeur.operateur(Op::Plus);
    for c in "10".chars() {
        editeur.chiffre(c);
    }
    editeur.pourcentage();
    assert_eq!(editeur.affichage(), "200 + 0.1");

    let calcul = editeur.egal().expect("calcul attendu");
    assert_eq!(calcul.resultat, "200.1");
}

#[test]
fn scenario_enchainement_apres_erreur() {
    let mut editeur = Editeur::default();
    editeur.chiffre('5');
    editeur.operateur(Op::Division);
    editeur.chiffre('0');
    assert!(editeur.egal().is_none());
    assert_eq!(editeur.affichage(), "Error");

    editeur.chiffre('6');
    editeur.operateur(Op::Plus);
    editeur.chiffre('1');
    let calcul = editeur.egal().expect("calcul attendu");
    assert_eq!(calcul.resultat, "7");
}

#[test]
fn scenario_aller_retour_du_resultat() {
    // un résultat déposé puis re-saisi chiffre par chiffre se ré-affiche
    // à l'identique (stabilité de la mise en forme)
    let mut editeur = Editeur::default();
    for c in "1000000".chars() {
        editeur.chiffre(c);
    }
    editeur.operateur(Op::Division);
    editeur.chiffre('1');
    let calcul = editeur.egal().expect("calcul attendu");
    assert_eq!(calcul.resultat, "1000000");
    let depose = editeur.affichage().to_string();
    assert_eq!(depose, "1,000,000");

    editeur.effacer();
    for c in calcul.resultat.chars() {
        match c {
            '.' => editeur.decimale(),
            _ => editeur.chiffre(c),
        }
    }
    assert_eq!(editeur.affichage(), depose);
}

#[test]
fn scenario_aller_retour_avec_decimales() {
    // 0.1 + 0.2 => "0.3" arrondi, qui se re-saisit et se ré-affiche pareil
    let mut editeur = Editeur::default();
    editeur.decimale();
    editeur.chiffre('1');
    editeur.operateur(Op::Plus);
    editeur.decimale();
    editeur.chiffre('2');
    let calcul = editeur.egal().expect("calcul attendu");
    assert_eq!(calcul.resultat, "0.3");
    let depose = editeur.affichage().to_string();

    editeur.effacer();
    for c in calcul.resultat.chars() {
        match c {
            '.' => editeur.decimale(),
            _ => editeur.chiffre(c),
        }
    }
    assert_eq!(editeur.affichage(), depose);
}

#[test]
fn scenario_egal_repete_est_stable() {
    let mut editeur = Editeur::default();
    editeur.chiffre('9');
    editeur.egal();
    // un second `=` ré-évalue le résultat seul : inchangé
    editeur.egal();
    assert_eq!(editeur.affichage(), "9");
}

/* ---- invariants sous saisie aléatoire ---- */

#[test]
fn fuzz_balance_jamais_negative_et_coherente() {
    let depart = Instant::now();
    for graine in 0..64 {
        if !budget(depart, Duration::from_secs(5)) {
            break;
        }
        let mut rng = Rng::new(graine);
        let mut editeur = Editeur::default();
        for _ in 0..200 {
            commande_aleatoire(&mut rng, &mut editeur);
            let reelle = balance_reelle(editeur.jetons());
            assert!(reelle >= 0, "balance négative (graine {graine})");
            assert_eq!(
                editeur.balance() as i64,
                reelle,
                "compteur désynchronisé (graine {graine})"
            );
        }
    }
}

#[test]
fn fuzz_affichage_jamais_vide() {
    let depart = Instant::now();
    for graine in 100..164 {
        if !budget(depart, Duration::from_secs(5)) {
            break;
        }
        let mut rng = Rng::new(graine);
        let mut editeur = Editeur::default();
        for _ in 0..200 {
            commande_aleatoire(&mut rng, &mut editeur);
            assert!(!editeur.affichage().is_empty(), "graine {graine}");
        }
    }
}

#[test]
fn fuzz_preparation_idempotente() {
    let depart = Instant::now();
    for graine in 200..264 {
        if !budget(depart, Duration::from_secs(5)) {
            break;
        }
        let mut rng = Rng::new(graine);
        let mut editeur = Editeur::default();
        for _ in 0..80 {
            commande_aleatoire(&mut rng, &mut editeur);
        }
        let une_fois = preparer(editeur.jetons());
        let deux_fois = preparer(&une_fois);
        assert_eq!(une_fois, deux_fois, "graine {graine}");
    }
}

#[test]
fn fuzz_egal_ne_panique_jamais() {
    let depart = Instant::now();
    for graine in 300..364 {
        if !budget(depart, Duration::from_secs(10)) {
            break;
        }
        let mut rng = Rng::new(graine);
        let mut editeur = Editeur::default();
        for _ in 0..60 {
            commande_aleatoire(&mut rng, &mut editeur);
        }
        // soit un calcul, soit "Error", soit un no-op : jamais de panique
        let _ = editeur.egal();
        assert!(!editeur.affichage().is_empty(), "graine {graine}");
    }
}
