// src/noyau/eval.rs
//
// Pipeline d'évaluation :
//   préparer (réparation) -> en_expression -> valider -> lexer
//     -> en_rpn -> evaluer_rpn
//
// La suite de jetons en cours d'édition n'est jamais tenue pour valide :
// seule la passe de réparation produit une copie évaluable (parenthèses
// équilibrées, pas d'opérateur pendant, alternance opérande/opérateur).
// Une copie vide signifie "rien à évaluer" : c'est un no-op, pas une erreur.

use super::erreur::ErreurCalcul;
use super::jetons::{Jeton, Op, Sens};
use super::rpn::{en_rpn, evaluer_rpn, JetonEval};

/* ------------------------ Réparation ------------------------ */

/// Répare une suite de jetons possiblement incomplète en une copie
/// syntaxiquement évaluable. Idempotente sur sa propre sortie.
///
/// - nombres dégénérés (`""`, `"-"`, `"."`) : abandonnés
/// - opérateur sans opérande valide à gauche : écrasé s'il suit un
///   opérateur (le plus récent gagne), abandonné sinon
/// - `)` sans `(` correspondante ou précédée d'un opérateur : abandonnée
/// - opérateurs pendants en fin : retirés
/// - `(` restées ouvertes : fermées, avec bouchon `0` si rien ne précède
pub fn preparer(jetons: &[Jeton]) -> Vec<Jeton> {
    let mut prepares: Vec<Jeton> = Vec::new();
    let mut ouvertes: usize = 0;

    for jeton in jetons {
        match jeton {
            Jeton::Nombre(brut) => {
                if matches!(brut.as_str(), "" | "-" | ".") {
                    continue;
                }
                prepares.push(jeton.clone());
            }

            Jeton::Operateur(op) => {
                if let Some(Jeton::Operateur(dernier)) = prepares.last_mut() {
                    *dernier = *op;
                } else if !matches!(
                    prepares.last(),
                    None | Some(Jeton::Parenthese(Sens::Ouvrante))
                ) {
                    prepares.push(jeton.clone());
                }
            }

            Jeton::Parenthese(Sens::Ouvrante) => {
                ouvertes += 1;
                prepares.push(jeton.clone());
            }

            Jeton::Parenthese(Sens::Fermante) => {
                if ouvertes > 0 {
                    if let Some(dernier) = prepares.last() {
                        if !matches!(dernier, Jeton::Operateur(_)) {
                            ouvertes -= 1;
                            prepares.push(jeton.clone());
                        }
                    }
                }
            }
        }
    }

    while matches!(prepares.last(), Some(Jeton::Operateur(_))) {
        prepares.pop();
    }

    while ouvertes > 0 {
        if matches!(
            prepares.last(),
            None | Some(Jeton::Operateur(_)) | Some(Jeton::Parenthese(Sens::Ouvrante))
        ) {
            prepares.push(Jeton::zero());
        }
        prepares.push(Jeton::Parenthese(Sens::Fermante));
        ouvertes -= 1;
    }

    prepares
}

/* ------------------------ Validation ------------------------ */

/// Refuse tout caractère hors `0-9 + - * / ( ) .`.
///
/// On ne nettoie jamais en silence : un caractère étranger est une
/// erreur d'évaluation (ex. un `e` de notation exponentielle laissé
/// par l'opération pourcentage).
pub fn valider(expression: &str) -> Result<(), ErreurCalcul> {
    let propre = expression
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.'));
    if propre {
        Ok(())
    } else {
        Err(ErreurCalcul::ExpressionInvalide)
    }
}

/* ------------------------ Lexer de l'évaluateur ------------------------ */

/// Lit une chaîne validée en jetons d'évaluation.
///
/// Un `-` qui ne suit pas une valeur (début, après opérateur, après `(`)
/// est le moins unaire `Neg` ; les autres `-` sont binaires.
fn lexer(expression: &str) -> Result<Vec<JetonEval>, ErreurCalcul> {
    let octets = expression.as_bytes();
    let mut sortie = Vec::new();
    let mut i = 0;
    let mut apres_valeur = false;

    while i < octets.len() {
        match octets[i] {
            b'0'..=b'9' | b'.' => {
                let debut = i;
                while i < octets.len() && matches!(octets[i], b'0'..=b'9' | b'.') {
                    i += 1;
                }
                let valeur: f64 = expression[debut..i]
                    .parse()
                    .map_err(|_| ErreurCalcul::ExpressionInvalide)?;
                sortie.push(JetonEval::Nombre(valeur));
                apres_valeur = true;
                continue;
            }
            b'(' => {
                sortie.push(JetonEval::Ouvrante);
                apres_valeur = false;
            }
            b')' => {
                sortie.push(JetonEval::Fermante);
                apres_valeur = true;
            }
            b'-' if !apres_valeur => {
                sortie.push(JetonEval::Neg);
            }
            b'+' => {
                sortie.push(JetonEval::Binaire(Op::Plus));
                apres_valeur = false;
            }
            b'-' => {
                sortie.push(JetonEval::Binaire(Op::Moins));
                apres_valeur = false;
            }
            b'*' => {
                sortie.push(JetonEval::Binaire(Op::Fois));
                apres_valeur = false;
            }
            b'/' => {
                sortie.push(JetonEval::Binaire(Op::Division));
                apres_valeur = false;
            }
            _ => return Err(ErreurCalcul::ExpressionInvalide),
        }
        i += 1;
    }

    Ok(sortie)
}

/* ------------------------ Évaluateur ------------------------ */

/// Évalue une expression infixe sur les quatre opérateurs et les
/// parenthèses, en double précision.
///
/// La division par zéro rend ±inf/NaN sans erreur : la politique de
/// résultat (format_resultat) tranche en aval.
pub fn evaluer(expression: &str) -> Result<f64, ErreurCalcul> {
    let jetons = lexer(expression)?;
    let rpn = en_rpn(&jetons)?;
    evaluer_rpn(&rpn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::jetons::en_expression;

    fn nombre(brut: &str) -> Jeton {
        Jeton::nombre(brut)
    }

    fn op(o: Op) -> Jeton {
        Jeton::Operateur(o)
    }

    fn ouvre() -> Jeton {
        Jeton::Parenthese(Sens::Ouvrante)
    }

    fn ferme() -> Jeton {
        Jeton::Parenthese(Sens::Fermante)
    }

    /* ------------------------ préparer ------------------------ */

    #[test]
    fn preparer_abandonne_nombres_degeneres() {
        let jetons = vec![nombre("-"), nombre("."), nombre(""), nombre("5")];
        assert_eq!(preparer(&jetons), vec![nombre("5")]);
    }

    #[test]
    fn preparer_abandonne_operateur_de_tete() {
        // l'opérateur de tête est abandonné, il reste [5] (le "0" de
        // tête qui donne "0+5" est inséré dès la saisie, pas ici)
        let jetons = vec![op(Op::Plus), nombre("5")];
        assert_eq!(preparer(&jetons), vec![nombre("5")]);
    }

    #[test]
    fn preparer_garde_le_dernier_operateur() {
        let jetons = vec![nombre("2"), op(Op::Plus), op(Op::Fois), nombre("3")];
        assert_eq!(
            preparer(&jetons),
            vec![nombre("2"), op(Op::Fois), nombre("3")]
        );
    }

    #[test]
    fn preparer_retire_operateur_pendante() {
        let jetons = vec![nombre("2"), op(Op::Plus)];
        assert_eq!(preparer(&jetons), vec![nombre("2")]);
    }

    #[test]
    fn preparer_ferme_les_parentheses() {
        let jetons = vec![ouvre(), nombre("2"), op(Op::Plus), nombre("3")];
        assert_eq!(
            preparer(&jetons),
            vec![ouvre(), nombre("2"), op(Op::Plus), nombre("3"), ferme()]
        );
    }

    #[test]
    fn preparer_bouchon_zero_pour_parenthese_vide() {
        // "(" seule => "(0)"
        let jetons = vec![ouvre()];
        assert_eq!(preparer(&jetons), vec![ouvre(), Jeton::zero(), ferme()]);
    }

    #[test]
    fn preparer_refuse_fermante_orpheline() {
        let jetons = vec![nombre("2"), ferme()];
        assert_eq!(preparer(&jetons), vec![nombre("2")]);
    }

    #[test]
    fn preparer_idempotente() {
        let cas: Vec<Vec<Jeton>> = vec![
            vec![op(Op::Plus), nombre("5")],
            vec![ouvre(), nombre("2"), op(Op::Plus)],
            vec![nombre("1"), op(Op::Fois), ouvre(), nombre("2"), op(Op::Plus), nombre("3")],
            vec![nombre("-"), ouvre(), ouvre(), nombre("7")],
            vec![],
        ];
        for jetons in cas {
            let une = preparer(&jetons);
            let deux = preparer(&une);
            assert_eq!(une, deux, "entrée: {jetons:?}");
        }
    }

    /* ------------------------ valider ------------------------ */

    #[test]
    fn valider_accepte_les_expressions_propres() {
        assert!(valider("1*(2+3)/4.5-0").is_ok());
        assert!(valider("").is_ok());
    }

    #[test]
    fn valider_refuse_caracteres_etrangers() {
        assert_eq!(valider("5e-7"), Err(ErreurCalcul::ExpressionInvalide));
        assert_eq!(valider("1 + 2"), Err(ErreurCalcul::ExpressionInvalide));
        assert_eq!(valider("2^3"), Err(ErreurCalcul::ExpressionInvalide));
    }

    /* ------------------------ evaluer ------------------------ */

    #[test]
    fn evaluer_precedence_et_parentheses() {
        assert_eq!(evaluer("1+2*3").unwrap(), 7.0);
        assert_eq!(evaluer("(1+2)*3").unwrap(), 9.0);
        assert_eq!(evaluer("1*(2+3)").unwrap(), 5.0);
    }

    #[test]
    fn evaluer_moins_unaire() {
        assert_eq!(evaluer("-3+2").unwrap(), -1.0);
        assert_eq!(evaluer("2*-3").unwrap(), -6.0);
        assert_eq!(evaluer("2+-0.5").unwrap(), 1.5);
    }

    #[test]
    fn evaluer_division_par_zero_non_finie() {
        assert!(evaluer("5/0").unwrap().is_infinite());
        assert!(evaluer("0/0").unwrap().is_nan());
    }

    #[test]
    fn evaluer_nombre_mal_forme() {
        assert_eq!(evaluer("1.2.3"), Err(ErreurCalcul::ExpressionInvalide));
        assert_eq!(evaluer("1(2+3)"), Err(ErreurCalcul::ExpressionInvalide));
    }

    #[test]
    fn preparer_puis_evaluer() {
        // suite d'édition "1 × (2 + 3" réparée puis évaluée
        let jetons = vec![
            nombre("1"),
            op(Op::Fois),
            ouvre(),
            nombre("2"),
            op(Op::Plus),
            nombre("3"),
        ];
        let prepares = preparer(&jetons);
        let expression = en_expression(&prepares);
        assert_eq!(expression, "1*(2+3)");
        assert_eq!(evaluer(&expression).unwrap(), 5.0);
    }
}
