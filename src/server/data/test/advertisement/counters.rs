use super::*;

/// Tests that impressions and clicks are incremented in place.
///
/// Expected: 2 impressions and 1 click
#[tokio::test]
async fn increments_impressions_and_clicks() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(Advertisement)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let ad = factory::advertisement::AdvertisementFactory::new(db)
        .build()
        .await?;

    let repo = AdvertisementRepository::new(db);
    repo.record_impressions(&[ad.id]).await?;
    repo.record_impressions(&[ad.id]).await?;
    repo.record_click(ad.id).await?;

    let stored = repo.find_by_id(ad.id).await?.unwrap();
    assert_eq!(stored.impressions, 2);
    assert_eq!(stored.clicks, 1);

    Ok(())
}
