//! Bundled default content, written to an empty durable store once.

use super::entities::{
    Achievement, AchievementCategory, Category, Collection, EntityRecord, PortfolioContent,
    Project, Settings, Skill,
};

pub const FALLBACK_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1677442136019-21780ecad995?auto=format&fit=crop&q=80&w=800";

pub const DEFAULT_ACCENT_COLOR: &str = "17 100% 55%";

fn project(
    id: &str,
    title: &str,
    context: Option<&str>,
    description: &str,
    technologies: &[&str],
    github_url: Option<&str>,
    live_url: Option<&str>,
) -> Project {
    Project {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        technologies: technologies.iter().map(|t| t.to_string()).collect(),
        github_url: github_url.map(str::to_string),
        live_url: live_url.map(str::to_string),
        context: context.map(str::to_string),
        image: FALLBACK_IMAGE_URL.to_string(),
    }
}

pub fn projects() -> Vec<Project> {
    vec![
        project(
            "long-context-llm",
            "Narrative Consistency Verification for Long-Context LLMs",
            Some("IIT Kharagpur Data Science Hackathon"),
            "Designed a long-context LLM reasoning system for narratives exceeding 100k+ words using evidence-grounded semantic retrieval and consistency scoring.",
            &["Python", "NLP", "Sentence Transformers", "Semantic Search", "Ollama"],
            Some("https://github.com/Veeky-kumar/long-context-reasoning-system-"),
            None,
        ),
        project(
            "resume-matching",
            "AI-Powered Resume Matching Platform (RAG)",
            None,
            "Built a semantic resume-JD matching platform using Retrieval-Augmented Generation and FAISS-based vector search.",
            &["Python", "FastAPI", "React", "FAISS", "RAG"],
            Some("https://github.com/Veeky-kumar/interviewAI"),
            Some("https://interview-ai-drab.vercel.app/"),
        ),
        project(
            "diabetes-prediction",
            "End-to-End Diabetes Risk Prediction System",
            None,
            "Developed a complete ML pipeline including preprocessing, model training, inference, and deployment.",
            &["Python", "Random Forest", "FastAPI", "React", "Docker"],
            None,
            Some("https://diabetes-prediction-frontend-delta.vercel.app/"),
        ),
    ]
}

pub fn skills() -> Vec<Skill> {
    const SKILLS: &[(&str, &str)] = &[
        ("Python", "programming"),
        ("SQL", "programming"),
        ("C++", "programming"),
        ("JavaScript", "programming"),
        ("TypeScript", "programming"),
        ("NLP", "ai-ml"),
        ("LLMs", "ai-ml"),
        ("RAG", "ai-ml"),
        ("Sentence Transformers", "ai-ml"),
        ("Hugging Face", "ai-ml"),
        ("PyTorch", "ai-ml"),
        ("TensorFlow", "ai-ml"),
        ("FAISS", "vector-search"),
        ("Pinecone", "vector-search"),
        ("Embeddings", "vector-search"),
        ("Semantic Similarity", "vector-search"),
        ("FastAPI", "backend"),
        ("Node.js", "backend"),
        ("Express", "backend"),
        ("REST APIs", "backend"),
        ("Microservices", "backend"),
        ("React.js", "frontend"),
        ("Tailwind CSS", "frontend"),
        ("HTML", "frontend"),
        ("CSS", "frontend"),
        ("Docker", "devops"),
        ("Git", "devops"),
        ("Linux", "devops"),
        ("AWS (Basics)", "devops"),
        ("CI/CD", "devops"),
        ("Vercel", "devops"),
        ("Render", "devops"),
        ("Ollama", "devops"),
    ];

    SKILLS
        .iter()
        .map(|(name, category)| Skill {
            name: name.to_string(),
            category: category.to_string(),
        })
        .collect()
}

pub fn categories() -> Vec<Category> {
    const CATEGORIES: &[(&str, &str)] = &[
        ("programming", "Programming"),
        ("ai-ml", "AI / ML"),
        ("vector-search", "Vector Search"),
        ("backend", "Backend"),
        ("frontend", "Frontend"),
        ("devops", "DevOps / Tools"),
    ];

    CATEGORIES
        .iter()
        .map(|(key, label)| Category {
            key: key.to_string(),
            label: label.to_string(),
        })
        .collect()
}

pub fn achievements() -> Vec<Achievement> {
    vec![
        Achievement {
            id: "iitkgp-hackathon".to_string(),
            title: "Data Science Hackathon Finalist".to_string(),
            issuer: "IIT Kharagpur".to_string(),
            date: "2025".to_string(),
            description: Some(
                "Long-context narrative consistency verification with evidence-grounded retrieval."
                    .to_string(),
            ),
            image: FALLBACK_IMAGE_URL.to_string(),
            link: None,
            category: AchievementCategory::Hackathon,
        },
        Achievement {
            id: "genai-certification".to_string(),
            title: "Generative AI Fundamentals".to_string(),
            issuer: "Google Cloud".to_string(),
            date: "2024".to_string(),
            description: None,
            image: FALLBACK_IMAGE_URL.to_string(),
            link: None,
            category: AchievementCategory::Certification,
        },
    ]
}

pub fn settings() -> Settings {
    Settings {
        video_url: String::new(),
        resume_url: "/resume.pdf".to_string(),
        resume_download_url: String::new(),
        accent_color: DEFAULT_ACCENT_COLOR.to_string(),
        show_video: true,
    }
}

pub fn content() -> PortfolioContent {
    PortfolioContent {
        projects: projects(),
        skills: skills(),
        achievements: achievements(),
        categories: categories(),
        settings: settings(),
    }
}

/// Default records of one list collection, in read order.
pub fn records(collection: Collection) -> Vec<EntityRecord> {
    match collection {
        Collection::Projects => projects().into_iter().map(EntityRecord::Project).collect(),
        Collection::Skills => skills().into_iter().map(EntityRecord::Skill).collect(),
        Collection::Achievements => achievements()
            .into_iter()
            .map(EntityRecord::Achievement)
            .collect(),
        Collection::Categories => categories()
            .into_iter()
            .map(EntityRecord::Category)
            .collect(),
        Collection::Settings => Vec::new(),
    }
}
