// src/noyau/jetons.rs

/// Nombre maximal de chiffres significatifs par nombre (saisie ET résultat).
pub const MAX_CHIFFRES: usize = 15;

/// Opérateur binaire du modèle d'édition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Plus,
    Moins,
    Fois,
    Division,
}

impl Op {
    /// Symbole ASCII, utilisé pour la chaîne d'évaluation.
    pub fn symbole(self) -> char {
        match self {
            Op::Plus => '+',
            Op::Moins => '-',
            Op::Fois => '*',
            Op::Division => '/',
        }
    }

    /// Glyphe localisé, utilisé pour l'affichage.
    pub fn glyphe(self) -> char {
        match self {
            Op::Plus => '+',
            Op::Moins => '−',
            Op::Fois => '×',
            Op::Division => '÷',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sens {
    Ouvrante,
    Fermante,
}

/// Jeton du modèle d'édition.
///
/// `Nombre` porte le texte brut en cours de saisie : il peut être
/// transitoirement vide, `"-"`, `"."` ou `"-."`. La validité syntaxique
/// n'est exigée qu'au moment de l'évaluation (passe de réparation).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Jeton {
    Nombre(String),
    Operateur(Op),
    Parenthese(Sens),
}

impl Jeton {
    pub fn nombre(brut: &str) -> Jeton {
        Jeton::Nombre(brut.to_string())
    }

    pub fn zero() -> Jeton {
        Jeton::nombre("0")
    }

    /// Vrai si le jeton peut terminer une valeur : nombre ou `)`.
    /// C'est le contexte qui autorise une fermeture de parenthèse
    /// ou déclenche une multiplication implicite.
    pub fn est_valeur(&self) -> bool {
        matches!(self, Jeton::Nombre(_) | Jeton::Parenthese(Sens::Fermante))
    }
}

/// Chiffres significatifs d'un texte brut (signe et point exclus).
pub fn compte_chiffres(texte: &str) -> usize {
    texte.chars().filter(|c| c.is_ascii_digit()).count()
}

/// Sérialisation vers la chaîne d'évaluation : concaténation ASCII pure,
/// sans séparateurs (les glyphes localisés ne sortent jamais par ici).
pub fn en_expression(jetons: &[Jeton]) -> String {
    let mut sortie = String::new();
    for jeton in jetons {
        match jeton {
            Jeton::Nombre(brut) => sortie.push_str(brut),
            Jeton::Operateur(op) => sortie.push(op.symbole()),
            Jeton::Parenthese(Sens::Ouvrante) => sortie.push('('),
            Jeton::Parenthese(Sens::Fermante) => sortie.push(')'),
        }
    }
    sortie
}
