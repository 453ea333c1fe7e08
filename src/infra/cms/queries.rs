//! Static GraphQL documents sent to the content delivery API.

macro_rules! table_fragment {
    () => {
        "fragment TableFragment on TableBlockRecord { __typename id table caption }"
    };
}

macro_rules! button_fragment {
    () => {
        "fragment ButtonFragment on ButtonRecord { __typename id label primary url }"
    };
}

macro_rules! media_fragment {
    () => {
        concat!(
            "fragment MediaFragment on ImageBlockRecord { __typename id image { ",
            "id title thumbhash tags smartTags md5 mimeType alt author basename ",
            "blurUpThumb blurhash copyright exifInfo customData format height width ",
            "responsiveImage { src srcSet sizes base64 bgColor aspectRatio height width } ",
            "video { thumbnailUrl thumbhash streamingUrl title width height blurUpThumb blurhash alt } ",
            "} }"
        )
    };
}

/// Article fields including structured content, its blocks, and linked
/// FAQ and article records. FAQ answers only select tables.
macro_rules! article_selection {
    () => {
        concat!(
            "id title slug content { value ",
            "blocks { ...TableFragment ...ButtonFragment ...MediaFragment } ",
            "links { ",
            "... on FaqModelRecord { __typename id faq { __typename id question ",
            "answer { value blocks { ...TableFragment } } } } ",
            "... on ArticleRecord { __typename id slug title } ",
            "} }"
        )
    };
}

macro_rules! fragments {
    () => {
        concat!(
            table_fragment!(),
            "\n",
            button_fragment!(),
            "\n",
            media_fragment!()
        )
    };
}

pub const ARTICLE_QUERY: &str = concat!(
    "query Article($slug: String) { article(filter: { slug: { eq: $slug } }) { ",
    article_selection!(),
    " } }\n",
    fragments!()
);

/// Same selection as [`ARTICLE_QUERY`] without a filter: the CMS returns the
/// first article.
pub const FIRST_ARTICLE_QUERY: &str = concat!(
    "query FirstArticle { article { ",
    article_selection!(),
    " } }\n",
    fragments!()
);

pub const ALL_ARTICLES_QUERY: &str = "query AllArticles { allArticles { id title slug } }";
