// src/noyau/courbe.rs
//
// Échantillonnage de f(x) pour le tracé d'une itération sélectionnée.
// Les points où f n'est pas définie (ou trop grande, près d'une asymptote)
// sont simplement omis : un trou isolé dans une courbe échantillonnée est normal.

use super::bissection::{Evaluable, ResultatBissection};
use super::parametres::Parametres;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Courbe {
    /// (x, f(x)) dans l'ordre des x croissants.
    pub points: Vec<[f64; 2]>,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,

    /// (a_i, f(a_i)), (b_i, f(b_i)), (c_i, f(c_i)) pour i <= index sélectionné.
    pub marqueurs_a: Vec<[f64; 2]>,
    pub marqueurs_b: Vec<[f64; 2]>,
    pub marqueurs_c: Vec<[f64; 2]>,

    /// L'itération sélectionnée est la dernière : son c est l'estimation finale.
    pub finale: bool,
}

/// Échantillonne f sur [min(a0, a_k) - marge, max(b0, b_k) + marge], k = index borné.
pub fn echantillonner<E: Evaluable + ?Sized>(
    f: &E,
    resultat: &ResultatBissection,
    index: usize,
    params: &Parametres,
) -> Courbe {
    echantillonner_sur(f, resultat, index, fenetre_x(resultat, index, params), params)
}

/// Fenêtre horizontale par défaut de l'itération `index` (bornée).
pub fn fenetre_x(resultat: &ResultatBissection, index: usize, params: &Parametres) -> [f64; 2] {
    let (a0, b0) = resultat.bornes_initiales();
    let (ak, bk) = resultat
        .iteration(resultat.borner_index(index))
        .map_or((a0, b0), |it| (it.a, it.b));
    [a0.min(ak) - params.marge_x, b0.max(bk) + params.marge_x]
}

/// Même échantillonnage sur une fenêtre imposée (zoom de la vue).
pub fn echantillonner_sur<E: Evaluable + ?Sized>(
    f: &E,
    resultat: &ResultatBissection,
    index: usize,
    [x_min, x_max]: [f64; 2],
    params: &Parametres,
) -> Courbe {
    let k = resultat.borner_index(index);
    let n = params.nb_segments.max(1);

    let points: Vec<[f64; 2]> = (0..=n)
        .filter_map(|i| {
            let x = x_min + (x_max - x_min) * (i as f64 / n as f64);
            match f.evaluer(x) {
                Ok(y) if y.abs() < params.borne_y => Some([x, y]),
                _ => None,
            }
        })
        .collect();

    // fenêtre verticale : contient toujours y = 0, marge de 10 %
    let (mut y_min, mut y_max) = points
        .iter()
        .fold((0.0f64, 0.0f64), |(lo, hi), p| (lo.min(p[1]), hi.max(p[1])));
    y_min *= 1.1;
    y_max *= 1.1;
    if y_max - y_min < f64::EPSILON {
        y_min -= 1.0;
        y_max += 1.0;
    }

    let visibles = resultat.iterations().iter().take(k + 1);
    let mut marqueurs_a = Vec::new();
    let mut marqueurs_b = Vec::new();
    let mut marqueurs_c = Vec::new();
    for it in visibles {
        marqueurs_a.push([it.a, it.fa]);
        marqueurs_b.push([it.b, it.fb]);
        marqueurs_c.push([it.c, it.fc]);
    }

    Courbe {
        points,
        x_min,
        x_max,
        y_min,
        y_max,
        marqueurs_a,
        marqueurs_b,
        marqueurs_c,
        finale: k + 1 == resultat.iterations().len(),
    }
}
