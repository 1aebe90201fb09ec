// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> f64
// Objectif:
// - Convertir une suite de JetonEval en RPN (postfix)
// - Puis replier la RPN sur f64
//
// Règles:
// - Précédence standard : × ÷ au-dessus de + −, binaires associatifs à gauche
// - Moins unaire : opérateur `Neg` dédié, précédence au-dessus de × ÷
//   (il reste collé à son opérande : "2*-3" => 2 3 Neg × => -6)
// - La division par zéro n'est PAS une erreur ici : elle produit ±inf/NaN,
//   rejetés plus loin par la mise en forme du résultat.

use super::erreur::ErreurCalcul;
use super::jetons::Op;

/// Jeton de l'évaluateur arithmétique (interne au pipeline).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum JetonEval {
    Nombre(f64),
    Binaire(Op),
    Neg,
    Ouvrante,
    Fermante,
}

fn precedence(jeton: &JetonEval) -> i32 {
    match jeton {
        JetonEval::Binaire(Op::Plus | Op::Moins) => 1,
        JetonEval::Binaire(Op::Fois | Op::Division) => 2,
        JetonEval::Neg => 3,
        _ => 0,
    }
}

/// Convertit une suite de jetons d'évaluation en RPN.
///
/// Exemple:
///   jetons: [1, +, 2, ×, 3]
///   rpn:    [1, 2, 3, ×, +]
pub fn en_rpn(jetons: &[JetonEval]) -> Result<Vec<JetonEval>, ErreurCalcul> {
    let mut sortie: Vec<JetonEval> = Vec::new();
    let mut pile: Vec<JetonEval> = Vec::new();

    for jeton in jetons.iter().copied() {
        match jeton {
            JetonEval::Nombre(_) => sortie.push(jeton),

            JetonEval::Ouvrante => pile.push(jeton),

            JetonEval::Fermante => {
                // dépile jusqu'à '('
                loop {
                    match pile.pop() {
                        Some(JetonEval::Ouvrante) => break,
                        Some(op) => sortie.push(op),
                        None => return Err(ErreurCalcul::ExpressionInvalide),
                    }
                }
            }

            JetonEval::Binaire(_) => {
                // binaire associatif à gauche : dépile tant que le sommet
                // a une précédence supérieure ou égale
                while let Some(sommet) = pile.last() {
                    if matches!(sommet, JetonEval::Ouvrante) {
                        break;
                    }
                    if precedence(sommet) >= precedence(&jeton) {
                        sortie.push(pile.pop().unwrap());
                    } else {
                        break;
                    }
                }
                pile.push(jeton);
            }

            JetonEval::Neg => {
                // unaire associatif à droite : rien au-dessus de sa
                // précédence, il s'empile toujours directement
                pile.push(jeton);
            }
        }
    }

    while let Some(op) = pile.pop() {
        if matches!(op, JetonEval::Ouvrante) {
            return Err(ErreurCalcul::ExpressionInvalide);
        }
        sortie.push(op);
    }

    Ok(sortie)
}

/// Replie une RPN sur f64.
pub fn evaluer_rpn(rpn: &[JetonEval]) -> Result<f64, ErreurCalcul> {
    let mut pile: Vec<f64> = Vec::new();

    for jeton in rpn.iter().copied() {
        match jeton {
            JetonEval::Nombre(v) => pile.push(v),

            JetonEval::Neg => {
                let x = pile.pop().ok_or(ErreurCalcul::ExpressionInvalide)?;
                pile.push(-x);
            }

            JetonEval::Binaire(op) => {
                let b = pile.pop().ok_or(ErreurCalcul::ExpressionInvalide)?;
                let a = pile.pop().ok_or(ErreurCalcul::ExpressionInvalide)?;
                let v = match op {
                    Op::Plus => a + b,
                    Op::Moins => a - b,
                    Op::Fois => a * b,
                    Op::Division => a / b,
                };
                pile.push(v);
            }

            JetonEval::Ouvrante | JetonEval::Fermante => {
                return Err(ErreurCalcul::ExpressionInvalide)
            }
        }
    }

    if pile.len() != 1 {
        return Err(ErreurCalcul::ExpressionInvalide);
    }
    Ok(pile.pop().unwrap())
}
