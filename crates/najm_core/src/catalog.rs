//! crates/najm_core/src/catalog.rs
//!
//! Immutable reference data: interface labels, the destinations gallery, the posts
//! that seed an empty community feed, and the assistant's fixed replies.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::domain::{ContentPost, Language};

//=========================================================================================
// Assistant replies
//=========================================================================================

pub const ADVICE_FALLBACK_EN: &str = "Sorry, something went error. Please try again later.";
pub const ADVICE_FALLBACK_AR: &str = "عذراً، حدث خطأ ما. يرجى المحاولة لاحقاً.";

/// Used when the service answers with nothing.
pub const EMPTY_ADVICE_REPLY: &str = "I'm sorry, I couldn't process that request.";

/// The apology shown in place of a failed advice request.
pub fn advice_fallback(language: Language) -> &'static str {
    match language {
        Language::Ar => ADVICE_FALLBACK_AR,
        Language::En => ADVICE_FALLBACK_EN,
    }
}

//=========================================================================================
// Interface labels
//=========================================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiText {
    pub nav_home: &'static str,
    pub nav_destinations: &'static str,
    pub nav_about: &'static str,
    pub nav_community: &'static str,
    pub nav_contact: &'static str,
    pub hero_title: &'static str,
    pub hero_subtitle: &'static str,
    pub ai_title: &'static str,
    pub ai_placeholder: &'static str,
    pub featured_destinations: &'static str,
    pub book_now: &'static str,
    pub about_title: &'static str,
    pub about_mission: &'static str,
    pub about_mission_desc: &'static str,
    pub about_values: &'static str,
    pub about_history: &'static str,
    pub about_history_desc: &'static str,
}

static UI_TEXT_EN: UiText = UiText {
    nav_home: "Home",
    nav_destinations: "Destinations",
    nav_about: "About Us",
    nav_community: "Feed",
    nav_contact: "Contact",
    hero_title: "Discover the Magic of Kyrgyzstan",
    hero_subtitle: "Your premium gateway to Central Asia's hidden paradise, tailored for our valued Arabic guests.",
    ai_title: "Najm AI Assistant",
    ai_placeholder: "Ask about halal food, prayer times, or family tours...",
    featured_destinations: "Explore Kyrgyzstan",
    book_now: "Plan Your Journey",
    about_title: "Our Story",
    about_mission: "Our Mission",
    about_mission_desc: "To provide an unparalleled, culturally sensitive tourism experience that bridges the heart of Central Asia with the hospitality of the Arab world.",
    about_values: "Our Values",
    about_history: "Our History",
    about_history_desc: "Founded in Bishkek, Najm Tourism began as a small vision to showcase the hidden gems of the Silk Road to the Middle East. Today, we are proud to be the leading agency for Arabic-speaking travelers.",
};

static UI_TEXT_AR: UiText = UiText {
    nav_home: "الرئيسية",
    nav_destinations: "الوجهات",
    nav_about: "من نحن",
    nav_community: "رحلاتنا",
    nav_contact: "اتصل بنا",
    hero_title: "اكتشف سحر قيرغيزستان",
    hero_subtitle: "بوابتك المتميزة إلى الجنة الخفية في آسيا الوسطى، مصممة خصيصاً لضيوفنا العرب الكرام.",
    ai_title: "مساعد نجم الذكي",
    ai_placeholder: "اسأل عن الأكل الحلال، أوقات الصلاة، أو الرحلات العائلية...",
    featured_destinations: "استكشف قيرغيزستان",
    book_now: "خطط لرحلتك",
    about_title: "قصتنا",
    about_mission: "مهمتنا",
    about_mission_desc: "تقديم تجربة سياحية لا تضاهى، تراعي الخصوصية الثقافية وتجسر المسافات بين قلب آسيا الوسطى وكرم الضيافة العربي.",
    about_values: "قيمنا",
    about_history: "تاريخنا",
    about_history_desc: "تأسست شركة نجم في بيشكيك، وبدأت كرؤية صغيرة لتسليط الضوء على كنوز طريق الحرير للعالم العربي. اليوم، نحن فخورون بأن نكون الوكالة الرائدة للمسافرين العرب.",
};

pub fn ui_text(language: Language) -> &'static UiText {
    match language {
        Language::Ar => &UI_TEXT_AR,
        Language::En => &UI_TEXT_EN,
    }
}

//=========================================================================================
// Destinations
//=========================================================================================

/// A value with one rendition per supported language.
#[derive(Debug, Clone, Copy)]
pub struct Localized<T> {
    pub en: T,
    pub ar: T,
}

impl<T: Copy> Localized<T> {
    pub fn get(&self, language: Language) -> T {
        match language {
            Language::Ar => self.ar,
            Language::En => self.en,
        }
    }
}

#[derive(Debug)]
pub struct Destination {
    pub id: &'static str,
    pub title: Localized<&'static str>,
    pub description: Localized<&'static str>,
    pub details: Localized<&'static [&'static str]>,
    pub image_url: &'static str,
    pub tags: Localized<&'static [&'static str]>,
}

/// A destination rendered in a single language.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationView {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub details: &'static [&'static str],
    pub image_url: &'static str,
    pub tags: &'static [&'static str],
}

impl Destination {
    pub fn localized(&self, language: Language) -> DestinationView {
        DestinationView {
            id: self.id,
            title: self.title.get(language),
            description: self.description.get(language),
            details: self.details.get(language),
            image_url: self.image_url,
            tags: self.tags.get(language),
        }
    }
}

pub static DESTINATIONS: [Destination; 4] = [
    Destination {
        id: "1",
        title: Localized { en: "Issyk-Kul Lake", ar: "بحيرة إيسيك كول" },
        description: Localized {
            en: "The pearl of Kyrgyzstan, a massive alpine lake surrounded by snow-capped mountains.",
            ar: "لؤلؤة قيرغيزستان، بحيرة جبلية ضخمة تحيط بها الجبال المغطاة بالثلوج.",
        },
        details: Localized {
            en: &["Luxury resorts on the northern shore", "Healing thermal springs", "Boat tours at sunset", "Halal-friendly beach clubs"],
            ar: &["منتجعات فاخرة على الشاطئ الشمالي", "ينابيع حرارية علاجية", "جولات بالقوارب عند غروب الشمس", "نوادي شاطئية حلال"],
        },
        image_url: "https://images.unsplash.com/photo-1570737197764-39fa78efae22?auto=format&fit=crop&q=80&w=800",
        tags: Localized { en: &["Nature", "Water"], ar: &["طبيعة", "مياه"] },
    },
    Destination {
        id: "2",
        title: Localized { en: "Ala Archa Canyon", ar: "وادي علا أرتشا" },
        description: Localized {
            en: "Stunning alpine National Park perfect for family picnics and light hiking.",
            ar: "منتزه وطني جبلي مذهل مثالي للنزهات العائلية والمشي لمسافات طويلة.",
        },
        details: Localized {
            en: &["Accessible paved trails for families", "Riverside picnic spots", "Majestic mountain peaks", "Clean, fresh mountain air"],
            ar: &["مسارات معبدة وسهلة للعائلات", "أماكن للنزهات بجانب النهر", "قمم جبلية مهيبة", "هواء جبلي نقي ومنعش"],
        },
        image_url: "https://images.unsplash.com/photo-1549413243-6c8a77a4190b?auto=format&fit=crop&q=80&w=800",
        tags: Localized { en: &["Mountains", "Adventure"], ar: &["جبال", "مغامرة"] },
    },
    Destination {
        id: "3",
        title: Localized { en: "Bishkek City", ar: "مدينة بيشكيك" },
        description: Localized {
            en: "The vibrant capital city blending Soviet history with modern Central Asian culture.",
            ar: "العاصمة النابضة بالحياة التي تمزج بين التاريخ السوفيتي وثقافة آسيا الوسطى الحديثة.",
        },
        details: Localized {
            en: &["Modern shopping malls", "Traditional Osh Bazaar", "Beautiful city parks", "Premium steak houses and cafes"],
            ar: &["مراكز تسوق حديثة", "سوق أوش التقليدي", "منتزهات المدينة الجميلة", "مطاعم فاخرة ومقاهي"],
        },
        image_url: "https://images.unsplash.com/photo-1569502741933-40a233306540?auto=format&fit=crop&q=80&w=800",
        tags: Localized { en: &["City", "Culture"], ar: &["مدينة", "ثقافة"] },
    },
    Destination {
        id: "4",
        title: Localized { en: "Son-Kul Lake", ar: "بحيرة سون كول" },
        description: Localized {
            en: "Experience the authentic nomadic lifestyle in traditional yurts.",
            ar: "جرب نمط الحياة البدوي الأصيل في الخيام التقليدية.",
        },
        details: Localized {
            en: &["Luxury yurt stays", "Traditional horse games", "Stargazing in clear skies", "Organic local dairy products"],
            ar: &["إقامة فاخرة في الخيام", "ألعاب الخيل التقليدية", "مراقبة النجوم في سماء صافية", "منتجات ألبان محلية عضوية"],
        },
        image_url: "https://images.unsplash.com/photo-1528659522105-081491147055?auto=format&fit=crop&q=80&w=800",
        tags: Localized { en: &["Nomadic", "Peaceful"], ar: &["بدوي", "هدوء"] },
    },
];

pub fn destinations(language: Language) -> Vec<DestinationView> {
    DESTINATIONS.iter().map(|d| d.localized(language)).collect()
}

//=========================================================================================
// Seed posts for an empty community feed
//=========================================================================================

struct SeedPost {
    id: &'static str,
    image_url: &'static str,
    author_name: &'static str,
    caption: Localized<&'static str>,
    location: &'static str,
    age_ms: i64,
}

const SEED_POSTS: [SeedPost; 2] = [
    SeedPost {
        id: "m1",
        image_url: "https://images.unsplash.com/photo-1570737197764-39fa78efae22?auto=format&fit=crop&q=80&w=800",
        author_name: "Ahmed Ali",
        caption: Localized { en: "Amazing view from Issyk-Kul!", ar: "منظر رائع من إيسيك كول!" },
        location: "Issyk-Kul",
        age_ms: 10_000_000,
    },
    SeedPost {
        id: "m2",
        image_url: "https://images.unsplash.com/photo-1549413243-6c8a77a4190b?auto=format&fit=crop&q=80&w=800",
        author_name: "Sara J.",
        caption: Localized { en: "Refreshing morning in the mountains", ar: "صباح منعش في الجبال" },
        location: "Ala-Archa",
        age_ms: 5_000_000,
    },
];

/// Builds the example posts, in display order, with captions in `language`.
pub fn seed_posts(language: Language, now: DateTime<Utc>) -> Vec<ContentPost> {
    SEED_POSTS
        .iter()
        .map(|seed| ContentPost {
            id: seed.id.to_string(),
            image_data: seed.image_url.to_string(),
            author_name: seed.author_name.to_string(),
            caption: seed.caption.get(language).to_string(),
            location: seed.location.to_string(),
            created_at: now - Duration::milliseconds(seed.age_ms),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destinations_render_in_requested_language() {
        let ar = destinations(Language::Ar);
        assert_eq!(ar.len(), 4);
        assert_eq!(ar[0].title, "بحيرة إيسيك كول");
        let en = destinations(Language::En);
        assert_eq!(en[3].title, "Son-Kul Lake");
        assert_eq!(en[1].tags, &["Mountains", "Adventure"]);
    }

    #[test]
    fn seed_posts_have_fixed_ids_and_localized_captions() {
        let now = Utc::now();
        let en = seed_posts(Language::En, now);
        let ar = seed_posts(Language::Ar, now);
        assert_eq!(en.len(), 2);
        assert_eq!(en[0].id, ar[0].id);
        assert_eq!(en[0].caption, "Amazing view from Issyk-Kul!");
        assert_eq!(ar[1].caption, "صباح منعش في الجبال");
        assert!(en[0].created_at < en[1].created_at);
    }

    #[test]
    fn fallback_matches_language() {
        assert_eq!(advice_fallback(Language::En), ADVICE_FALLBACK_EN);
        assert_eq!(ui_text(Language::En).ai_title, "Najm AI Assistant");
    }
}
