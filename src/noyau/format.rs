// src/noyau/format.rs
//
// Affichage :
// - forme normalisée d'une Expr (parenthèses minimales, relisible par le noyau)
// - nombres en précision fixe (tableau, CSV, démarche)
// - lignes tabulaires d'une exécution + export CSV

use super::bissection::{Iteration, ResultatBissection};
use super::expr::Expr;

/// En dessous de ce seuil, une valeur s'affiche 0 (évite "-0.000000").
pub const SEUIL_AFFICHAGE: f64 = 1e-10;

/// Colonnes du tableau (et de l'en-tête CSV).
pub const ENTETES: [&str; 9] = [
    "Iteration",
    "a",
    "b",
    "c",
    "f(a)",
    "f(b)",
    "f(c)",
    "b-a",
    "ToleranceMet",
];

/* ------------------------ Nombres ------------------------ */

/// Précision fixe, avec |v| < 1e-10 normalisé à 0.
pub fn format_fixe(v: f64, precision: usize) -> String {
    let v = if v.abs() < SEUIL_AFFICHAGE { 0.0 } else { v };
    format!("{v:.precision$}")
}

pub fn format_booleen(b: bool) -> &'static str {
    if b {
        "TRUE"
    } else {
        "FALSE"
    }
}

/* ------------------------ Lignes tabulaires ------------------------ */

/// Une ligne plate : Iteration, a, b, c, f(a), f(b), f(c), b-a, ToleranceMet.
pub fn ligne_tabulaire(it: &Iteration, precision: usize) -> [String; 9] {
    [
        it.index.to_string(),
        format_fixe(it.a, precision),
        format_fixe(it.b, precision),
        format_fixe(it.c, precision),
        format_fixe(it.fa, precision),
        format_fixe(it.fb, precision),
        format_fixe(it.fc, precision),
        format_fixe(it.largeur, precision),
        format_booleen(it.tolerance_atteinte).to_string(),
    ]
}

/// Détail court de l'itération sélectionnée (à côté des contrôles ◀ / ▶).
pub fn resume_iteration(it: &Iteration, precision: usize) -> String {
    let fx = |v: f64| format_fixe(v, precision);
    format!(
        "a = {}, b = {}, c = {}, f(c) = {}, b - a = {}",
        fx(it.a),
        fx(it.b),
        fx(it.c),
        fx(it.fc),
        fx(it.largeur)
    )
}

/// Export CSV (en-tête + une ligne par itération, séparateur ',', fin de ligne '\n').
pub fn exporter_csv(resultat: &ResultatBissection, precision: usize) -> String {
    let mut lignes = Vec::with_capacity(resultat.iterations().len() + 1);
    lignes.push(ENTETES.join(","));
    for it in resultat.iterations() {
        lignes.push(ligne_tabulaire(it, precision).join(","));
    }
    lignes.join("\n")
}

/* ------------------------ Forme normalisée ------------------------ */

fn rang(e: &Expr) -> u8 {
    use Expr::*;

    match e {
        Add(_, _) | Sub(_, _) => 1,
        Mul(_, _) | Div(_, _) => 2,
        Neg(_) => 3,
        Pow(_, _) => 4,
        Nombre(_) | X | Pi | Appel(_, _) => 5,
    }
}

fn sous_expr(e: &Expr, rang_min: u8) -> String {
    let s = format_expr(e);
    if rang(e) < rang_min {
        format!("({s})")
    } else {
        s
    }
}

/// Forme normalisée (ex: x^3 - x - 2, 2*x^2, 1/cos(x)).
/// Relire cette forme redonne le même arbre.
pub fn format_expr(e: &Expr) -> String {
    use Expr::*;

    match e {
        Nombre(v) => format!("{v}"),
        X => "x".to_string(),
        Pi => "pi".to_string(),

        Neg(a) => format!("-{}", sous_expr(a, 3)),

        Add(a, b) => format!("{} + {}", sous_expr(a, 1), sous_expr(b, 2)),
        Sub(a, b) => format!("{} - {}", sous_expr(a, 1), sous_expr(b, 2)),
        Mul(a, b) => format!("{}*{}", sous_expr(a, 2), sous_expr(b, 3)),
        Div(a, b) => format!("{}/{}", sous_expr(a, 2), sous_expr(b, 3)),

        // base atomique ; exposant associatif à droite
        Pow(a, b) => format!("{}^{}", sous_expr(a, 5), sous_expr(b, 4)),

        Appel(f, a) => format!("{}({})", f.nom(), format_expr(a)),
    }
}
