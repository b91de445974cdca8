use super::*;

/// Tests which ads count as running.
///
/// Inactive ads and ads outside their window are skipped. Open-ended windows run.
///
/// Expected: Ok with the unscheduled and the in-window ad, by sort order
#[tokio::test]
async fn returns_active_ads_within_window() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(Advertisement)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let now = Utc::now();

    let in_window = factory::advertisement::AdvertisementFactory::new(db)
        .sort_order(1)
        .window(Some(now - Duration::days(1)), Some(now + Duration::days(1)))
        .build()
        .await?;
    let unscheduled = factory::advertisement::AdvertisementFactory::new(db)
        .sort_order(2)
        .build()
        .await?;
    factory::advertisement::AdvertisementFactory::new(db)
        .window(Some(now - Duration::days(3)), Some(now - Duration::days(2)))
        .build()
        .await?;
    factory::advertisement::AdvertisementFactory::new(db)
        .window(Some(now + Duration::days(1)), None)
        .build()
        .await?;
    factory::advertisement::AdvertisementFactory::new(db)
        .active(false)
        .build()
        .await?;

    let ads = AdvertisementRepository::new(db).running(None, now).await?;

    let ids: Vec<i32> = ads.iter().map(|ad| ad.id).collect();
    assert_eq!(ids, vec![in_window.id, unscheduled.id]);

    Ok(())
}

/// Tests filtering running ads by position.
///
/// Expected: Ok with only the sidebar ad
#[tokio::test]
async fn filters_by_position() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(Advertisement)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::advertisement::AdvertisementFactory::new(db)
        .build()
        .await?;
    let sidebar = factory::advertisement::AdvertisementFactory::new(db)
        .position("sidebar")
        .build()
        .await?;

    let ads = AdvertisementRepository::new(db)
        .running(Some(AdPosition::Sidebar), Utc::now())
        .await?;

    assert_eq!(ads.len(), 1);
    assert_eq!(ads[0].id, sidebar.id);
    assert_eq!(ads[0].position, AdPosition::Sidebar);

    Ok(())
}
