//! Knowledge base dump

use anyhow::Result;

use nutriscan_core::KnowledgeSnapshot;

pub fn cmd_knowledge(json: bool) -> Result<()> {
    let snapshot = KnowledgeSnapshot::collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!();
    println!("🧪 Problematic ingredients (checked for everyone)");
    for item in &snapshot.problematic_ingredients {
        println!("   [{:<6}] {} - {}", item.severity.as_str(), item.term, item.issue);
    }

    println!();
    println!("🥜 Allergens");
    for group in &snapshot.allergens {
        println!("   {:<12} {}", group.name, group.terms.join(", "));
    }

    println!();
    println!("🥗 Dietary restrictions");
    for group in &snapshot.dietary_restrictions {
        println!("   {:<12} {}", group.name, group.terms.join(", "));
    }

    println!();
    println!("🩺 Health conditions");
    for group in &snapshot.health_conditions {
        println!("   {:<17} {}", group.name, group.terms.join(", "));
    }

    println!();
    println!("🏃 Fitness goals");
    for entry in &snapshot.fitness_goals {
        println!("   {}", entry.goal);
        println!("      good:  {}", entry.profile.good.join(", "));
        println!("      avoid: {}", entry.profile.avoid.join(", "));
    }
    println!();

    Ok(())
}
