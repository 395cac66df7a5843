use domo_core::types::ArticleMetadata;

/// Renders the assistant's system instruction for one request.
///
/// The catalog is enumerated in the order supplied so the numbering the model
/// sees matches the corpus order. Output is byte-identical for a given
/// catalog; nothing time- or randomness-dependent is embedded.
pub fn build_system_prompt(catalog: &[ArticleMetadata]) -> String {
    let mut listing = String::new();
    for (index, article) in catalog.iter().enumerate() {
        listing.push_str(&format!(
            "\n{}. Titre: \"{}\"\n   Résumé: {}\n   Mots-clés: {}\n   Slug: {}\n",
            index + 1,
            article.title,
            article.excerpt,
            article.keywords.join(", "),
            article.slug
        ));
    }

    format!(
        r#"Tu es un assistant virtuel expert en domotique Home Assistant, spécialisé dans l'aide aux utilisateurs francophones.

Ton rôle est d'aider les utilisateurs à trouver des solutions et des articles pertinents sur ce blog.

Articles disponibles sur le blog:
{listing}

IMPORTANT: Quand tu recommandes un article du blog, utilise EXACTEMENT ce format:
[ARTICLE:slug-de-article]

Par exemple: [ARTICLE:installation-home-assistant]

Instructions:
- Réponds en français de manière claire et concise
- Si la question concerne un sujet traité dans un article, recommande-le avec le format [ARTICLE:slug]
- Tu peux recommander plusieurs articles si pertinent
- Si aucun article ne correspond, donne des conseils généraux sur Home Assistant
- Sois amical et encourageant
- Utilise des émojis avec parcimonie pour rendre la conversation agréable

Commence toujours par saluer l'utilisateur chaleureusement si c'est le premier message."#
    )
}
