// src/noyau/format.rs
//
// Trois mises en forme distinctes :
// - format_nombre_affichage : un texte brut -> forme groupée (1,234,567)
// - affichage_jetons        : la suite de jetons -> chaîne d'écran
// - format_resultat         : f64 -> texte canonique, avec politique de
//   dépassement (plafond 15 chiffres) et bascule exponentielle sous 1e-6.

use super::erreur::ErreurCalcul;
use super::jetons::{compte_chiffres, Jeton, Sens, MAX_CHIFFRES};

/// Plus grande partie entière admise : 10^15 - 1 (exact en f64).
const MAX_ENTIER_ABS: f64 = 999_999_999_999_999.0;

/* ------------------------ Affichage en cours de saisie ------------------------ */

fn grouper_milliers(entier: &str) -> String {
    let longueur = entier.chars().count();
    let mut sortie = String::with_capacity(longueur + longueur / 3);
    for (i, c) in entier.chars().enumerate() {
        if i > 0 && (longueur - i) % 3 == 0 {
            sortie.push(',');
        }
        sortie.push(c);
    }
    sortie
}

/// Mise en forme "vivante" d'un texte brut de nombre.
///
/// Les formes transitoires (`""`, `"-"`, `"."`, `"-."`) et les notations
/// exponentielles passent telles quelles ; sinon la partie entière est
/// groupée par milliers, un point final éventuel est réattaché.
pub fn format_nombre_affichage(brut: &str) -> String {
    if matches!(brut, "" | "-" | "." | "-.") {
        return brut.to_string();
    }
    if brut.contains(['e', 'E']) {
        return brut.to_string();
    }

    let (corps, point_final) = match brut.strip_suffix('.') {
        Some(c) => (c, "."),
        None => (brut, ""),
    };
    let (signe, corps) = match corps.strip_prefix('-') {
        Some(c) => ("-", c),
        None => ("", corps),
    };
    let (entier, fraction) = match corps.split_once('.') {
        Some((e, f)) => (e, Some(f)),
        None => (corps, None),
    };
    let entier = if entier.is_empty() { "0" } else { entier };
    let groupe = grouper_milliers(entier);

    match fraction {
        Some(f) => format!("{signe}{groupe}.{f}"),
        None => format!("{signe}{groupe}{point_final}"),
    }
}

/// Chaîne d'écran pour une suite de jetons.
///
/// Les opérateurs sortent en glyphe localisé entouré d'espaces simples,
/// les parenthèses en littéral, les nombres via la mise en forme vivante.
/// Repli sur `"0"` si la suite est vide ou ne produit rien de visible.
pub fn affichage_jetons(jetons: &[Jeton]) -> String {
    if jetons.is_empty() {
        return "0".to_string();
    }

    let mut sortie = String::new();
    for jeton in jetons {
        match jeton {
            Jeton::Operateur(op) => {
                sortie.push(' ');
                sortie.push(op.glyphe());
                sortie.push(' ');
            }
            Jeton::Parenthese(Sens::Ouvrante) => sortie.push('('),
            Jeton::Parenthese(Sens::Fermante) => sortie.push(')'),
            Jeton::Nombre(brut) => sortie.push_str(&format_nombre_affichage(brut)),
        }
    }

    let normalise = sortie.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalise.is_empty() {
        "0".to_string()
    } else {
        normalise
    }
}

/* ------------------------ Résultat d'évaluation ------------------------ */

/// Texte canonique d'un résultat numérique.
///
/// - non fini -> `ResultatInvalide`
/// - arrondi à 8 décimales, demi arrondi loin de zéro
/// - magnitude non nulle sous 1e-6 -> notation exponentielle (6 décimales)
/// - partie entière au-delà de 10^15-1, ou plus de 15 chiffres
///   significatifs en décimal -> `Depassement`
pub fn format_resultat(valeur: f64) -> Result<String, ErreurCalcul> {
    if !valeur.is_finite() {
        return Err(ErreurCalcul::ResultatInvalide);
    }

    let mut arrondi = (valeur * 1e8).round() / 1e8;
    if arrondi == 0.0 {
        arrondi = 0.0; // évite le "-0"
    }
    let absolu = arrondi.abs();

    if absolu != 0.0 && absolu < 1e-6 {
        return Ok(format!("{arrondi:.6e}"));
    }

    if absolu.trunc() > MAX_ENTIER_ABS {
        return Err(ErreurCalcul::Depassement);
    }

    let texte = arrondi.to_string();
    if compte_chiffres(&texte) > MAX_CHIFFRES {
        return Err(ErreurCalcul::Depassement);
    }

    Ok(texte)
}
