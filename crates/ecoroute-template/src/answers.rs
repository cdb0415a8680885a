// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned answers keyed by topic phrase.

/// Topic phrase and answer. The first phrase found in the lowercased
/// prompt wins, so more specific phrases come first.
pub const TOPICS: &[(&str, &str)] = &[
    ("renewable energy", RENEWABLE_ENERGY),
    ("climate change", CLIMATE_CHANGE),
    ("sustainability", SUSTAINABILITY),
    ("carbon footprint", CARBON_FOOTPRINT),
];

const RENEWABLE_ENERGY: &str = "\
Renewable energy refers to energy sources that are naturally replenished and virtually inexhaustible on human timescales. The main types include:

• Solar energy - from sunlight using photovoltaic panels or solar thermal systems
• Wind energy - from wind turbines that convert wind motion into electricity
• Hydroelectric power - from flowing water in rivers and dams
• Geothermal energy - from heat stored beneath the Earth's surface
• Biomass energy - from organic materials like wood, crops, and waste

These sources produce little to no greenhouse gas emissions compared to fossil fuels, making them crucial for combating climate change and achieving sustainable development.";

const CLIMATE_CHANGE: &str = "\
Climate change refers to long-term shifts in global temperatures and weather patterns. While climate variations occur naturally, human activities have been the main driver since the 1800s, primarily through burning fossil fuels.

Key impacts include:
• Rising global temperatures
• More frequent extreme weather events
• Sea level rise
• Ocean acidification
• Ecosystem disruption

Solutions involve reducing greenhouse gas emissions through renewable energy, energy efficiency, sustainable transportation, and protecting natural carbon sinks like forests.";

const SUSTAINABILITY: &str = "\
Sustainability means meeting present needs without compromising future generations' ability to meet their own needs. It has three main pillars:

Environmental: Protecting natural resources and ecosystems
Economic: Supporting long-term economic growth and prosperity
Social: Ensuring social equity and human well-being

Key practices include using renewable energy, reducing waste, conserving water, supporting local communities, and making environmentally conscious choices in daily life.";

const CARBON_FOOTPRINT: &str = "\
A carbon footprint is the total amount of greenhouse gases (primarily CO₂) emitted directly or indirectly by an individual, organization, event, or product.

It's measured in tons of CO₂ equivalent and includes:
• Direct emissions from activities you control (driving, heating)
• Indirect emissions from products you use (food, clothing, services)

Ways to reduce your carbon footprint:
• Use renewable energy
• Drive less, walk/bike more
• Eat less meat, more plant-based foods
• Reduce, reuse, recycle
• Choose energy-efficient appliances
• Support sustainable companies";

/// Fallback for prompts outside the canned topics.
pub fn generic_answer(prompt: &str) -> String {
    format!(
        "I understand you're asking about: {prompt}

This is a simplified response. For more detailed information, I'd recommend:
• Consulting reliable sources like scientific journals
• Checking government environmental websites
• Speaking with experts in the field
• Using more advanced AI models for complex queries

The topic you're interested in is important for understanding environmental issues and sustainability."
    )
}

/// Finds the canned answer for `prompt`, matching case-insensitively.
pub fn lookup(prompt: &str) -> Option<&'static str> {
    let lowered = prompt.to_lowercase();
    TOPICS
        .iter()
        .find(|(phrase, _)| lowered.contains(phrase))
        .map(|&(_, answer)| answer)
}
