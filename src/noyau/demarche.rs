// src/noyau/demarche.rs
//
// Démarche (résolution rédigée) d'une exécution :
// énoncé, justification, 1re et 2e itérations, "⋯", dernière itération,
// règle d'arrêt et estimation finale. Texte brut, une ligne par entrée.

use super::bissection::{garder_gauche, Iteration, ResultatBissection};
use super::format::format_fixe;

fn etape(it: &Iteration, precision: usize, lignes: &mut Vec<String>) {
    let k = it.index;
    let p = k - 1;
    let fx = |v: f64| format_fixe(v, precision);

    lignes.push(format!("Itération {k} :"));
    lignes.push(format!(
        "  c{k} = (a{p} + b{p}) / 2 = ({} + {}) / 2 = {}",
        fx(it.a),
        fx(it.b),
        fx(it.c)
    ));
    lignes.push(format!("  f(c{k}) = {}", fx(it.fc)));

    let decision = if garder_gauche(it.fa, it.fc) {
        format!("  f(a{p})·f(c{k}) < 0 ⇒ racine ∈ [a{p}, c{k}]")
    } else {
        format!("  f(b{p})·f(c{k}) ≤ 0 ⇒ racine ∈ [c{k}, b{p}]")
    };
    lignes.push(decision);
}

/// Résolution rédigée, prête à afficher.
pub fn rediger(resultat: &ResultatBissection, precision: usize) -> Vec<String> {
    let (a0, b0) = resultat.bornes_initiales();
    let its = resultat.iterations();
    let mut lignes = Vec::new();

    lignes.push(format!(
        "Problème : trouver une racine de f(x) = {} sur [{a0}, {b0}]",
        resultat.fonction()
    ));
    lignes.push(
        "Comme f(a0)·f(b0) ≤ 0 et f est continue sur [a0, b0], une racine existe dans l’intervalle."
            .to_string(),
    );

    match its {
        [] => {}
        [seule] => etape(seule, precision, &mut lignes),
        [premiere, seconde] => {
            etape(premiere, precision, &mut lignes);
            etape(seconde, precision, &mut lignes);
        }
        [premiere, seconde, .., derniere] => {
            etape(premiere, precision, &mut lignes);
            etape(seconde, precision, &mut lignes);
            lignes.push("⋯".to_string());
            etape(derniere, precision, &mut lignes);
        }
    }

    lignes.push(format!(
        "On divise l’intervalle en deux jusqu’à bk − ak < ε, avec ε = {}.",
        resultat.tolerance()
    ));
    lignes.push(format!(
        "Arrêt après {} itération(s) : {}.",
        its.len(),
        resultat.arret().description()
    ));
    lignes.push(format!(
        "Le milieu du dernier intervalle donne la racine approchée : x ≈ {}",
        format_fixe(resultat.racine(), precision)
    ));

    lignes
}
