// Data Dragon endpoints and asset URL builders

pub const DATA_DRAGON_BASE: &str = "https://ddragon.leagueoflegends.com";

pub fn versions_url() -> String {
    format!("{}/api/versions.json", DATA_DRAGON_BASE)
}

pub fn champions_url(version: &str, locale: &str) -> String {
    format!(
        "{}/cdn/{}/data/{}/champion.json",
        DATA_DRAGON_BASE, version, locale
    )
}

pub fn champion_icon_url(version: &str, champion_id: &str) -> String {
    format!(
        "{}/cdn/{}/img/champion/{}.png",
        DATA_DRAGON_BASE, version, champion_id
    )
}

pub fn item_icon_url(version: &str, item_id: u32) -> String {
    format!("{}/cdn/{}/img/item/{}.png", DATA_DRAGON_BASE, version, item_id)
}
