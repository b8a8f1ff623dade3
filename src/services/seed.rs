use crate::database::DbPool;
use crate::models::video::CreateVideoRequest;
use crate::services::media_url::MediaUrls;
use crate::services::video::{count_videos, create_video};
use crate::utils::error::AppResult;

struct SampleVideo {
    title: &'static str,
    description: &'static str,
    thumbnail: &'static str,
    duration: &'static str,
    category: &'static str,
    views: &'static str,
}

const SAMPLE_VIDEO_FILE: &str = "placeholder.mp4";

const SAMPLES: &[SampleVideo] = &[
    SampleVideo {
        title: "Exploring the Mountains",
        description: "A beautiful journey through the snowy peaks.",
        thumbnail: "https://via.placeholder.com/400x225.png?text=Mountain+Video",
        duration: "10:32",
        category: "Travel",
        views: "1500",
    },
    SampleVideo {
        title: "How to Cook Pasta",
        description: "A simple and delicious pasta recipe for beginners.",
        thumbnail: "https://via.placeholder.com/400x225.png?text=Cooking+Video",
        duration: "05:15",
        category: "Cooking",
        views: "8500",
    },
    SampleVideo {
        title: "Introduction to React",
        description: "Learn the basics of React in this comprehensive tutorial.",
        thumbnail: "https://via.placeholder.com/400x225.png?text=Tech+Video",
        duration: "45:10",
        category: "Tech",
        views: "12000",
    },
    SampleVideo {
        title: "Morning Yoga Flow",
        description: "Start your day with this refreshing 15-minute yoga session.",
        thumbnail: "https://via.placeholder.com/400x225.png?text=Yoga+Video",
        duration: "15:00",
        category: "Fitness",
        views: "950",
    },
];

/// Inserts the sample catalogue into an empty table. Returns the number of rows added.
pub async fn seed_sample_videos(pool: &DbPool) -> AppResult<usize> {
    if count_videos(pool).await? > 0 {
        tracing::info!("Videos already present, skipping samples");
        return Ok(0);
    }

    let urls = MediaUrls::default();
    for sample in SAMPLES {
        let request = urls.normalize_create(CreateVideoRequest {
            title: sample.title.to_string(),
            description: Some(sample.description.to_string()),
            category: Some(sample.category.to_string()),
            thumbnail: Some(sample.thumbnail.to_string()),
            video_url: Some(SAMPLE_VIDEO_FILE.to_string()),
            duration: Some(sample.duration.to_string()),
            views: Some(sample.views.to_string()),
        });
        create_video(pool, request).await?;
    }

    tracing::info!("Sample videos created: {}", SAMPLES.len());
    Ok(SAMPLES.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::create_memory_pool;
    use crate::services::video::list_videos;

    #[tokio::test]
    async fn samples_are_seeded_once_in_canonical_form() {
        let pool = create_memory_pool().await.unwrap();

        assert_eq!(seed_sample_videos(&pool).await.unwrap(), 4);
        assert_eq!(seed_sample_videos(&pool).await.unwrap(), 0);

        let videos = list_videos(&pool).await.unwrap();
        assert_eq!(videos.len(), 4);
        assert!(videos.iter().all(|v| v.video_url == "/videos/placeholder.mp4"));
        assert!(videos.iter().all(|v| v.thumbnail.starts_with("https://via.placeholder.com/")));
    }
}
